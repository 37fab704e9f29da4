use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: i32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    pub limit: i32,
}

fn default_page() -> i32 {
    1
}

fn default_limit() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindByIdProductRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Field patch for an existing product. The `id` is the envelope id and is
/// always authoritative; the patch itself carries no identifier to apply.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
}
