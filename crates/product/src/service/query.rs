use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::FindAllProducts,
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            product::ProductResponse,
        },
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::collections::HashSet;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Finding all products | page: {}, limit: {}",
            req.page, req.limit
        );

        let page = if req.page > 0 { req.page } else { 1 };
        let limit = if req.limit > 0 { req.limit } else { 10 };

        let normalized = FindAllProducts { page, limit };

        let (products, total) = self.query.find_available(&normalized).await?;

        let last_page = total.div_ceil(limit as i64);

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!(
            "✅ Fetched {} products (total: {}, last page: {})",
            data.len(),
            total,
            last_page
        );

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Products fetched successfully".to_string(),
            data,
            meta: Pagination {
                page,
                total,
                last_page,
            },
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {}", id);

        let product = self.query.find_by_id(id).await?;

        let Some(product) = product else {
            error!("❌ Product with id #{} not found", id);
            return Err(ServiceError::NotFound(format!(
                "Product with id #{id} not found"
            )));
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product fetched successfully".to_string(),
            data: product.into(),
        })
    }

    async fn validate_products(
        &self,
        ids: &[i32],
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("📦 Validating {} product IDs", ids.len());

        // Duplicates in the request are harmless; one fetch per unique id.
        let mut seen = HashSet::new();
        let unique_ids: Vec<i32> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let products = self.query.find_by_ids(&unique_ids).await?;

        if products.len() != unique_ids.len() {
            let found_ids: HashSet<i32> = products.iter().map(|p| p.product_id).collect();
            let missing: Vec<String> = unique_ids
                .iter()
                .filter(|id| !found_ids.contains(id))
                .map(|id| id.to_string())
                .collect();

            let message = format!("Products with ids {} not found", missing.join(", "));
            error!("❌ {}", message);
            return Err(ServiceError::NotFound(message));
        }

        info!("✅ Validated {} products", products.len());

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Products validated successfully".to_string(),
            data: products.into_iter().map(ProductResponse::from).collect(),
        })
    }
}
