//! API Module
//!
//! HTTP handlers and routing for the cache and validation service.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
