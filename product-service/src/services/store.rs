use crate::dtos::ProductFields;
use crate::models::Product;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence operations behind the product routes.
///
/// Every fault is returned as an `AppError` carrying a readable message;
/// implementations never retry.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;

    /// Insert a new product. The store assigns the id.
    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError>;

    async fn insert_many(&self, products: Vec<ProductFields>) -> Result<Vec<Product>, AppError>;

    /// Merge `fields` into the product with `id` and return the updated
    /// record, or `None` when no product has that id.
    async fn update_by_id(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<Option<Product>, AppError>;

    /// Remove the product with `id`, returning it if it existed.
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
