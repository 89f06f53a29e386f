//! One-time population of an empty product collection.

use crate::dtos::ProductFields;
use crate::services::store::ProductStore;
use service_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and this many sample products were added.
    Seeded(usize),
    /// The collection already held this many products; nothing was written.
    AlreadyPopulated(u64),
}

pub fn sample_products() -> Vec<ProductFields> {
    vec![
        ProductFields::new("Product 1", 20.0, "Description 1"),
        ProductFields::new("Product 2", 30.0, "Description 2"),
        ProductFields::new("Product 3", 25.0, "Description 3"),
    ]
}

/// Insert the sample products if and only if the store holds none.
pub async fn initialize_products(store: &dyn ProductStore) -> Result<SeedOutcome, AppError> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::debug!(count = existing, "Products already present, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated(existing));
    }

    let inserted = store.insert_many(sample_products()).await?;
    tracing::info!(count = inserted.len(), "Dummy products added successfully");

    Ok(SeedOutcome::Seeded(inserted.len()))
}
