//! Application State
//!
//! Shared state accessible by all handlers.

use crate::database::DatabaseManager;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database manager answering lookups
    pub manager: Arc<DatabaseManager>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(manager: Arc<DatabaseManager>, request_timeout: Duration) -> Self {
        Self {
            manager,
            request_timeout,
            start_time: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
