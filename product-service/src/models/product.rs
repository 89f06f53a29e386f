use crate::dtos::ProductFields;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// A product document as stored in the `products` collection.
///
/// Every field besides `_id` is optional: the collection imposes no schema
/// beyond these three loosely typed attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Build a new document with a freshly generated id.
    pub fn new(fields: ProductFields) -> Self {
        Self {
            id: ObjectId::new(),
            name: fields.name.flatten(),
            price: fields.price.flatten(),
            description: fields.description.flatten(),
        }
    }

    /// Merge the given fields in place. Absent fields are left untouched,
    /// explicit nulls clear the attribute.
    pub fn apply(&mut self, fields: ProductFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
    }
}

/// Parse a path id into an `ObjectId`.
pub fn parse_product_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| {
        AppError::BadRequest(anyhow::anyhow!(
            "Cast to ObjectId failed for value \"{}\" at path \"_id\" for model \"Product\"",
            id
        ))
    })
}
