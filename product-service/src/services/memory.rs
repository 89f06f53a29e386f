use crate::dtos::ProductFields;
use crate::models::Product;
use crate::services::store::ProductStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Process-local product store, kept in insertion order.
///
/// Used by tests only; each instance is isolated.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.read().await.clone())
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError> {
        let product = Product::new(fields);
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn insert_many(&self, products: Vec<ProductFields>) -> Result<Vec<Product>, AppError> {
        let products: Vec<Product> = products.into_iter().map(Product::new).collect();
        self.products.write().await.extend(products.iter().cloned());
        Ok(products)
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<Option<Product>, AppError> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.apply(fields);
            product.clone()
        }))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError> {
        let mut products = self.products.write().await;
        Ok(products
            .iter()
            .position(|p| p.id == id)
            .map(|index| products.remove(index)))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
