use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
}

impl ProductCommandService {
    pub fn new(query: DynProductQueryRepository, command: DynProductCommandRepository) -> Self {
        Self { query, command }
    }

    /// Existence/availability pre-check shared by update and remove.
    /// The subsequent write is a separate statement; a row soft-deleted
    /// in between is not guarded against.
    async fn ensure_available(&self, id: i32) -> Result<ProductModel, ServiceError> {
        let product = self.query.find_by_id(id).await?;

        product.ok_or_else(|| {
            error!("❌ Product with id #{} not found", id);
            ServiceError::NotFound(format!("Product with id #{id} not found"))
        })
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating product: {}", req.name);

        let product = self.command.create(req).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product created successfully".to_string(),
            data: product.into(),
        })
    }

    async fn update(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID {}", req.id);

        self.ensure_available(req.id).await?;

        let product = self.command.update(req).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product updated successfully".to_string(),
            data: product.into(),
        })
    }

    async fn remove(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Removing product ID {}", id);

        self.ensure_available(id).await?;

        let product = self.command.mark_unavailable(id).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product removed successfully".to_string(),
            data: product.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::service::ProductQueryServiceTrait,
        service::{mocks::MemoryProductRepository, query::ProductQueryService},
    };
    use std::sync::Arc;

    fn service_with(repo: &MemoryProductRepository) -> ProductCommandService {
        ProductCommandService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn create_assigns_fresh_unique_ids_and_defaults_available() {
        let repo = MemoryProductRepository::new();
        let service = service_with(&repo);

        let first = service
            .create(&CreateProductRequest {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();
        let second = service
            .create(&CreateProductRequest {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();

        assert!(first.data.available);
        assert!(second.data.available);
        assert_ne!(first.data.id, second.data.id);
    }

    #[tokio::test]
    async fn update_patches_only_named_fields() {
        let repo = MemoryProductRepository::new();
        let id = repo.insert("before", 5.0, true);
        let service = service_with(&repo);

        let updated = service
            .update(&UpdateProductRequest {
                id,
                name: Some("after".to_string()),
                price: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.data.id, id);
        assert_eq!(updated.data.name, "after");
        assert_eq!(updated.data.price, 5.0);
    }

    #[tokio::test]
    async fn update_missing_or_unavailable_fails_not_found() {
        let repo = MemoryProductRepository::new();
        let gone = repo.insert("gone", 1.0, false);
        let service = service_with(&repo);

        let patch = UpdateProductRequest {
            id: gone,
            name: Some("x".to_string()),
            price: None,
        };
        let err = service.update(&patch).await.unwrap_err();
        match err {
            ServiceError::NotFound(message) => {
                assert_eq!(message, format!("Product with id #{gone} not found"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_flips_available_and_is_not_idempotent() {
        let repo = MemoryProductRepository::new();
        let id = repo.insert("doomed", 3.0, true);
        let service = service_with(&repo);

        let removed = service.remove(id).await.unwrap();
        assert!(!removed.data.available);

        // The pre-check no longer sees the row, so a second remove errors.
        let err = service.remove(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_find_remove_recreate_round_trip() {
        let repo = MemoryProductRepository::new();
        let command = service_with(&repo);
        let query = ProductQueryService::new(Arc::new(repo.clone()));

        let created = command
            .create(&CreateProductRequest {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();
        let id = created.data.id;

        let fetched = query.find_by_id(id).await.unwrap();
        assert!(fetched.data.available);
        assert_eq!(fetched.data.name, "Widget");

        command.remove(id).await.unwrap();
        assert!(matches!(
            query.find_by_id(id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));

        let recreated = command
            .create(&CreateProductRequest {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();
        assert_ne!(recreated.data.id, id);
    }
}
