//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::calculator::Calculator;
use crate::config::ApiConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Calculator carrying the configured defaults and scale anchor
    pub calculator: Arc<Calculator>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(calculator: Calculator, config: ApiConfig) -> Self {
        Self {
            calculator: Arc::new(calculator),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
