//! HTTP API Layer
//!
//! This crate provides the REST API for products, customers and bills using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Tracing, audit logging, request timeout
//! - **DTOs**: Request bodies with `validator` rules
//! - **Error Handling**: `PortError` to HTTP status mapping
//!
//! Handlers only see the port traits, so the same router runs over the
//! PostgreSQL adapters in production and the in-memory mocks in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool), &config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use domain_billing::BillPort;
use domain_catalog::{CustomerPort, ProductPort};
use infra_db::{PostgresBillAdapter, PostgresCustomerAdapter, PostgresProductAdapter};

use crate::config::ApiConfig;
use crate::handlers::{bill, customer, health, product};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductPort>,
    pub customers: Arc<dyn CustomerPort>,
    pub bills: Arc<dyn BillPort>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductPort>,
        customers: Arc<dyn CustomerPort>,
        bills: Arc<dyn BillPort>,
    ) -> Self {
        Self {
            products,
            customers,
            bills,
        }
    }

    /// State backed by the PostgreSQL adapters sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresProductAdapter::new(pool.clone())),
            Arc::new(PostgresCustomerAdapter::new(pool.clone())),
            Arc::new(PostgresBillAdapter::new(pool)),
        )
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Port implementations used by the handlers
/// * `config` - API configuration; supplies the request timeout
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState, config: &ApiConfig) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let product_routes = Router::new()
        .route("/", get(product::list_products).post(product::create_product))
        .route(
            "/:id",
            get(product::get_product)
                .patch(product::update_product)
                .delete(product::delete_product),
        );

    let customer_routes = Router::new()
        .route("/", get(customer::list_customers).post(customer::create_customer))
        .route(
            "/:id",
            get(customer::get_customer)
                .patch(customer::update_customer)
                .delete(customer::delete_customer),
        );

    // one parameter name per segment position, as the matcher requires
    let bill_routes = Router::new()
        .route("/", get(bill::list_bills).post(bill::create_bill))
        .route(
            "/:id",
            get(bill::get_bill)
                .patch(bill::update_bill)
                .delete(bill::delete_bill),
        )
        .route(
            "/:id/product",
            get(bill::list_bill_products).post(bill::add_bill_product),
        )
        .route("/:id/product/:product_id", delete(bill::remove_bill_product));

    let api_routes = Router::new()
        .nest("/product", product_routes)
        .nest("/customer", customer_routes)
        .nest("/bill", bill_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
