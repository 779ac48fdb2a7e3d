//! HTTP surface for the trowel estimating engine.
//!
//! Exposes calculator discovery, calculation and BOM export endpoints
//! over axum. All handlers share one read-only [`Registry`] built at
//! startup.

pub mod bom;
pub mod error;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use trowel_calculator::Registry;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state. The registry is populated once and never
/// mutated, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new() -> Self {
        Self { registry: Arc::new(Registry::with_builtins()) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the application router. Static segments are registered
/// alongside the `{calculator_type}` capture; axum prefers the literal
/// match, so `/calculators/search` never resolves as a type id.
pub fn create_app() -> Router {
    let state = AppState::new();
    Router::new()
        .route("/health", get(routes::health))
        .route("/calculators", get(routes::list_calculators))
        .route("/calculators/categories", get(routes::list_categories))
        .route("/calculators/search", get(routes::search_calculators))
        .route("/calculators/{calculator_type}", get(routes::get_calculator))
        .route(
            "/calculators/{calculator_type}/calculate",
            post(routes::run_calculation),
        )
        .route("/exports/bom", post(routes::export_bom))
        .route("/exports/bom/csv", post(routes::export_bom_csv))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
