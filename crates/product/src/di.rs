use crate::{
    repository::{command::ProductCommandRepository, query::ProductQueryRepository},
    service::{command::ProductCommandService, query::ProductQueryService},
};
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: ProductQueryService,
    pub product_command: ProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool) -> Self {
        let product_query_repo = Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_command_repo = Arc::new(ProductCommandRepository::new(pool));

        let product_query = ProductQueryService::new(product_query_repo.clone());
        let product_command = ProductCommandService::new(product_query_repo, product_command_repo);

        Self {
            product_query,
            product_command,
        }
    }
}
