use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    rows: Vec<ProductModel>,
    next_id: i32,
}

/// In-memory stand-in for the sqlx repositories. Rows are kept in
/// insertion order, which matches the identity ordering the real
/// queries use.
#[derive(Clone, Default)]
pub struct MemoryProductRepository {
    inner: Arc<Mutex<State>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, price: f64, available: bool) -> i32 {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(ProductModel {
            product_id: id,
            name: name.to_string(),
            price,
            available,
            created_at: None,
            updated_at: None,
        });
        id
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryProductRepository {
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        let state = self.inner.lock().unwrap();

        let available: Vec<ProductModel> = state
            .rows
            .iter()
            .filter(|p| p.available)
            .cloned()
            .collect();
        let total = available.len() as i64;

        let offset = ((req.page - 1).max(0) as usize) * req.limit as usize;
        let page = available
            .into_iter()
            .skip(offset)
            .take(req.limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .find(|p| p.product_id == id && p.available)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .filter(|p| ids.contains(&p.product_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryProductRepository {
    async fn create(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let id = self.insert(&product.name, product.price, true);
        let state = self.inner.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .find(|p| p.product_id == id)
            .cloned()
            .expect("row just inserted"))
    }

    async fn update(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut state = self.inner.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|p| p.product_id == product.id && p.available)
            .ok_or(RepositoryError::Sqlx(sqlx::Error::RowNotFound))?;

        if let Some(name) = &product.name {
            row.name = name.clone();
        }
        if let Some(price) = product.price {
            row.price = price;
        }

        Ok(row.clone())
    }

    async fn mark_unavailable(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        let mut state = self.inner.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|p| p.product_id == id)
            .ok_or(RepositoryError::Sqlx(sqlx::Error::RowNotFound))?;

        row.available = false;
        Ok(row.clone())
    }
}
