use crate::domain::{
    requests::product::{CreateProductRequest, UpdateProductRequest},
    response::{api::ApiResponse, product::ProductResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;

    async fn update(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;

    async fn remove(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
