use crate::config::MongoConfig;
use crate::dtos::ProductFields;
use crate::models::Product;
use crate::services::store::ProductStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;

/// Database used when neither the config nor the URI names one.
pub const DEFAULT_DATABASE: &str = "test";

const PRODUCTS_COLLECTION: &str = "products";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Open a client and verify the deployment answers a ping.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(config.uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::from(e)
            })?;
        client_options.app_name = Some("product-service".to_string());

        let database = config
            .database
            .clone()
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(database = %database, "Connecting to MongoDB");
        let store = Self {
            db: client.database(&database),
            client,
        };
        store.health_check().await?;
        tracing::info!(database = %database, "Connected to MongoDB");

        Ok(store)
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// `$set` document for the fields present in an update body.
fn set_document(fields: ProductFields) -> Document {
    let mut set = Document::new();
    if let Some(name) = fields.name {
        set.insert("name", name);
    }
    if let Some(price) = fields.price {
        set.insert("price", price);
    }
    if let Some(description) = fields.description {
        set.insert("description", description);
    }
    set
}

#[async_trait]
impl ProductStore for MongoDb {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.products().find(None, None).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, AppError> {
        let product = Product::new(fields);
        self.products().insert_one(&product, None).await?;
        tracing::debug!(product_id = %product.id, "Inserted product");
        Ok(product)
    }

    async fn insert_many(&self, products: Vec<ProductFields>) -> Result<Vec<Product>, AppError> {
        let products: Vec<Product> = products.into_iter().map(Product::new).collect();
        if products.is_empty() {
            return Ok(products);
        }
        self.products().insert_many(&products, None).await?;
        Ok(products)
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        fields: ProductFields,
    ) -> Result<Option<Product>, AppError> {
        let filter = doc! { "_id": id };

        if fields.is_empty() {
            return Ok(self.products().find_one(filter, None).await?);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let update = doc! { "$set": set_document(fields) };

        Ok(self
            .products()
            .find_one_and_update(filter, update, options)
            .await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Product>, AppError> {
        Ok(self
            .products()
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.products().count_documents(None, None).await?)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
