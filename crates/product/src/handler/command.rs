use crate::{
    abstract_trait::product::service::DynProductCommandService,
    domain::requests::product::{
        CreateProductRequest, FindByIdProductRequest, UpdateProductRequest,
    },
    handler::{check, decode, encode},
};
use serde_json::Value;
use shared::errors::ErrorBody;
use tracing::info;

#[derive(Clone)]
pub struct ProductCommandHandler {
    pub command: DynProductCommandService,
}

impl ProductCommandHandler {
    pub fn new(command: DynProductCommandService) -> Self {
        Self { command }
    }

    pub async fn create(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: create_product");

        let req: CreateProductRequest = decode(payload)?;
        check(&req)?;

        let response = self.command.create(&req).await.map_err(ErrorBody::from)?;

        info!(
            "Product created successfully with ID: {}",
            response.data.id
        );
        encode(&response)
    }

    pub async fn update(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: update_product");

        let req: UpdateProductRequest = decode(payload)?;
        check(&req)?;

        let response = self.command.update(&req).await.map_err(ErrorBody::from)?;

        info!("Product updated successfully with ID: {}", req.id);
        encode(&response)
    }

    pub async fn remove(&self, payload: Value) -> Result<Value, ErrorBody> {
        info!("Handling RPC message: remove_product");

        let req: FindByIdProductRequest = decode(payload)?;
        check(&req)?;

        let response = self.command.remove(req.id).await.map_err(ErrorBody::from)?;

        info!("Product removed successfully with ID: {}", req.id);
        encode(&response)
    }
}
