use crate::{domain::requests::product::FindAllProducts, model::product::Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Returns one page of available products together with the total
    /// count of available rows, regardless of whether the page is empty.
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;

    /// Looks up a product by id, filtered on `available = TRUE`.
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;

    /// Fetches every product whose id is in `ids`, ignoring availability.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError>;
}
