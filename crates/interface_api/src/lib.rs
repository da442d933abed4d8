//! HTTP API Layer
//!
//! This crate provides the REST API behind the academy's billing, accounts
//! and my-payments views using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for billing, students and health
//! - **Middleware**: Request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(billing, students, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_billing::BillingService;
use domain_student::StudentSource;

use crate::config::ApiConfig;
use crate::middleware::request_log_middleware;
use crate::handlers::{billing, health, students};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub billing: Arc<BillingService>,
    pub students: Arc<dyn StudentSource>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        billing: Arc<BillingService>,
        students: Arc<dyn StudentSource>,
        config: ApiConfig,
    ) -> Self {
        Self { billing, students, config }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Billing service, student source and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Billing routes
    let billing_routes = Router::new()
        .route("/", get(billing::list_invoices))
        .route("/", put(billing::replace_invoices))
        .route("/cache", delete(billing::invalidate_cache))
        .route("/summary", get(billing::get_summary))
        .route("/overdue-sweep", post(billing::sweep_overdue))
        .route("/invoices/:id", get(billing::get_invoice))
        .route("/invoices/:id/payments", post(billing::record_payment));

    // Student routes
    let student_routes = Router::new()
        .route("/:id/invoices", get(students::list_student_invoices));

    let api_routes = Router::new()
        .nest("/billing", billing_routes)
        .nest("/students", student_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
