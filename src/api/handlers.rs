//! API Handlers
//!
//! HTTP request handlers for the cache and validation endpoints.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::{SharedCache, TtlCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, CpfRequest, DeleteResponse, GetResponse, HealthResponse, PhoneRequest,
    SetRequest, SetResponse, StatsResponse, ValidationResponse,
};
use crate::validators::{normalize_phone, Cpf};

/// Application state shared across all handlers.
///
/// Owns the one cache instance of the process; handlers reach it only
/// through this state.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
}

impl AppState {
    pub fn new(cache: TtlCache<serde_json::Value>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Builds the cache from the configured default TTL and entry bound.
    pub fn from_config(config: &Config) -> Self {
        let mut cache = TtlCache::new().with_default_ttl(config.default_ttl_ms);
        if let Some(max_entries) = config.max_entries {
            cache = cache.with_max_entries(max_entries);
        }
        Self::new(cache)
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.lock().await;
    match req.ttl_ms {
        Some(ttl_ms) => cache.set_with_ttl(req.key.clone(), req.value, ttl_ms),
        None => cache.set(req.key.clone(), req.value),
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    let now = cache.now_ms();

    match cache.get_entry(&key) {
        Some(entry) => Ok(Json(GetResponse::from_entry(key, entry, now))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.lock().await.delete(&key);
    Json(DeleteResponse::new(key, removed))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.lock().await.clear();
    debug!("cache cleared");
    Json(ClearResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.lock().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for POST /validate/cpf
pub async fn validate_cpf_handler(Json(req): Json<CpfRequest>) -> Json<ValidationResponse> {
    let response = match Cpf::parse(&req.cpf) {
        Ok(cpf) => ValidationResponse::valid(cpf.to_string()),
        Err(e) => ValidationResponse::invalid(e.to_string()),
    };
    Json(response)
}

/// Handler for POST /validate/phone
pub async fn validate_phone_handler(Json(req): Json<PhoneRequest>) -> Json<ValidationResponse> {
    let response = match normalize_phone(&req.phone) {
        Ok(formatted) => ValidationResponse::valid(formatted),
        Err(e) => ValidationResponse::invalid(e.to_string()),
    };
    Json(response)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
