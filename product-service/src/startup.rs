//! Application wiring: router construction and server lifecycle.

use crate::config::ProductConfig;
use crate::handlers;
use crate::services::{initialize_products, MongoDb, ProductStore, SeedOutcome};
use axum::{
    http::Request,
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::permissive_cors,
    metrics::metrics_middleware,
    tracing::{http_request_span, request_id_middleware},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

/// Build the HTTP router around an injected product store.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            http_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .layer(permissive_cors())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    store: Arc<dyn ProductStore>,
}

impl Application {
    /// Connect to MongoDB, seed it, and bind the listener.
    pub async fn build(config: ProductConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb).await.map_err(|e| {
            tracing::error!("Error connecting to MongoDB: {}", e);
            e
        })?;

        Self::build_with_store(config, Arc::new(db)).await
    }

    /// Seed the given store and bind the listener. Seeding failures are
    /// logged and do not prevent startup.
    pub async fn build_with_store(
        config: ProductConfig,
        store: Arc<dyn ProductStore>,
    ) -> Result<Self, AppError> {
        match initialize_products(store.as_ref()).await {
            Ok(SeedOutcome::Seeded(count)) => {
                tracing::info!(count, "Seeded empty product collection");
            }
            Ok(SeedOutcome::AlreadyPopulated(count)) => {
                tracing::info!(count, "Product collection already populated");
            }
            Err(e) => tracing::error!("Error initializing products: {}", e),
        }

        let router = build_router(AppState::new(store.clone()));

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server running on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            store,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        self.store.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_graceful_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
