use crate::{
    abstract_trait::product::service::DynProductQueryService,
    domain::requests::product::{FindAllProducts, FindByIdProductRequest},
    handler::{check, decode, encode},
};
use serde_json::Value;
use shared::errors::ErrorBody;
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryHandler {
    pub query: DynProductQueryService,
}

impl ProductQueryHandler {
    pub fn new(query: DynProductQueryService) -> Self {
        Self { query }
    }

    pub async fn find_all(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: find_all_products");

        let req: FindAllProducts = decode(payload)?;
        check(&req)?;

        let response = self.query.find_all(&req).await.map_err(ErrorBody::from)?;

        info!("Successfully fetched {} products", response.data.len());
        encode(&response)
    }

    pub async fn find_one(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: find_one_product");

        let req: FindByIdProductRequest = decode(payload)?;
        check(&req)?;

        let response = self
            .query
            .find_by_id(req.id)
            .await
            .map_err(ErrorBody::from)?;

        info!("Successfully fetched product with ID: {}", req.id);
        encode(&response)
    }

    pub async fn validate_products(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: validate_products");

        let ids: Vec<i32> = decode(payload)?;

        let response = self
            .query
            .validate_products(&ids)
            .await
            .map_err(ErrorBody::from)?;

        info!("Successfully validated {} products", response.data.len());
        encode(&response)
    }
}
