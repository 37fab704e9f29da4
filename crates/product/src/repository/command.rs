use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, price, available, created_at, updated_at)
            VALUES ($1, $2, TRUE, current_timestamp, current_timestamp)
            RETURNING product_id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            result.product_id, result.name
        );
        Ok(result)
    }

    async fn update(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                updated_at = current_timestamp
            WHERE product_id = $1 AND available = TRUE
            RETURNING product_id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(product.name.as_deref())
        .bind(product.price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {}", result.product_id);
        Ok(result)
    }

    async fn mark_unavailable(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        info!("🗑️ Marking product unavailable: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Matches the row by id alone, with no `available = TRUE` filter.
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET available = FALSE,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING product_id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark product {} unavailable: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Product ID {} marked unavailable", product.product_id);
        Ok(product)
    }
}
