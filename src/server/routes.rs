//! Route handlers
//!
//! - GET /?ip=<address> - Region lookup
//! - GET /health - Database and cache status

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::state::AppState;
use crate::database::RegionRecord;
use crate::error::{RegionError, Result};

/// Health endpoint body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub loaded: bool,
    pub cache_entries: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /?ip=<address>
///
/// Returns the region record as a JSON object. A missing address or any
/// lookup failure yields an empty JSON array. When `ip` repeats, the first
/// value wins.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let ip = params
        .into_iter()
        .find(|(key, _)| key == "ip")
        .map(|(_, value)| value)
        .unwrap_or_default();

    if ip.is_empty() {
        return Json(json!([]));
    }

    match resolve(&state, &ip).await {
        Ok(record) => match serde_json::to_value(&record) {
            Ok(value) => Json(value),
            Err(e) => {
                log::error!("{} {}", ip, e);
                Json(json!([]))
            }
        },
        Err(e) => {
            if e.is_not_found() {
                log::debug!("{} {}", ip, e);
            } else {
                log::warn!("{} {}", ip, e);
            }
            Json(json!([]))
        }
    }
}

/// Query the manager, moving the first (file reading) lookup of a lazily
/// loaded database off the async workers
async fn resolve(state: &AppState, ip: &str) -> Result<RegionRecord> {
    if state.manager.is_loaded() {
        return state.manager.query(ip);
    }

    let manager = state.manager.clone();
    let ip = ip.to_string();
    tokio::task::spawn_blocking(move || manager.query(&ip))
        .await
        .map_err(|e| RegionError::Other(format!("Lookup task failed: {}", e)))?
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let loaded = state.manager.is_loaded();

    Json(HealthResponse {
        // "lazy": the image is read by the first lookup
        status: if loaded { "ok" } else { "lazy" }.to_string(),
        database: state.manager.database_name().to_string(),
        loaded,
        cache_entries: state.manager.cache_stats(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
