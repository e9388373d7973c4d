//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, get_handler, health_handler, set_handler, stats_handler,
    validate_cpf_handler, validate_phone_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value
/// - `GET /get/:key` - Retrieve a live value
/// - `DELETE /del/:key` - Delete a key (idempotent)
/// - `POST /clear` - Drop every entry
/// - `GET /stats` - Live count, approximate size and counters
/// - `POST /validate/cpf` - CPF check-digit validation
/// - `POST /validate/phone` - Phone number validation
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, since the school web client runs on its own origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/clear", post(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/validate/cpf", post(validate_cpf_handler))
        .route("/validate/phone", post(validate_phone_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
