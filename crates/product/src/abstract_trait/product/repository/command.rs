use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create(&self, product: &CreateProductRequest)
    -> Result<ProductModel, RepositoryError>;

    /// Applies the patch to the row matching `id` AND `available = TRUE`.
    async fn update(&self, product: &UpdateProductRequest)
    -> Result<ProductModel, RepositoryError>;

    /// Flips `available` to false on the row matching `id`. Does not
    /// re-filter on availability; the write matches soft-deleted rows too.
    async fn mark_unavailable(&self, id: i32) -> Result<ProductModel, RepositoryError>;
}
