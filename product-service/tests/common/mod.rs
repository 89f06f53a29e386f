#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use mongodb::bson::oid::ObjectId;
use product_service::config::{MongoConfig, ProductConfig};
use product_service::dtos::ProductFields;
use product_service::models::Product;
use product_service::services::{InMemoryProductStore, MongoDb, ProductStore};
use product_service::startup::Application;
use product_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Router over a fresh, isolated in-memory store.
pub fn memory_app() -> (Router, Arc<InMemoryProductStore>) {
    let store = Arc::new(InMemoryProductStore::new());
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}

/// A store whose every operation fails, as a lost connection would.
pub struct FailingStore;

fn outage() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("connection closed"))
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Err(outage())
    }

    async fn insert(&self, _fields: ProductFields) -> Result<Product, AppError> {
        Err(outage())
    }

    async fn insert_many(&self, _products: Vec<ProductFields>) -> Result<Vec<Product>, AppError> {
        Err(outage())
    }

    async fn update_by_id(
        &self,
        _id: ObjectId,
        _fields: ProductFields,
    ) -> Result<Option<Product>, AppError> {
        Err(outage())
    }

    async fn delete_by_id(&self, _id: ObjectId) -> Result<Option<Product>, AppError> {
        Err(outage())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Err(outage())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(outage())
    }
}

pub fn failing_app() -> Router {
    build_router(AppState::new(Arc::new(FailingStore)))
}

pub fn test_config(uri: &str, database: Option<String>) -> ProductConfig {
    ProductConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: Secret::new(uri.to_string()),
            database,
        },
    }
}

/// A running server backed by a real MongoDB database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("product_test_{}", Uuid::new_v4());
        let config = test_config(&uri, Some(db_name.clone()));

        let db = MongoDb::connect(&config.mongodb)
            .await
            .expect("Failed to connect to MongoDB");

        let app = Application::build_with_store(config, Arc::new(db.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
