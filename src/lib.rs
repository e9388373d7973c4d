//! School Core - caching and validation utilities for a school-management app
//!
//! Provides a lazily-expiring TTL cache, Brazilian document and contact
//! validators, and an HTTP service exposing both.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod validators;

pub use api::{create_router, AppState};
pub use cache::{CacheStats, TtlCache};
pub use config::Config;
