//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for sharing across async tasks; the dashboard data is
//! read-only after load, so no locking is involved.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::DashboardData;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded tables and worldwide totals
    pub data: Arc<DashboardData>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(data: Arc<DashboardData>) -> Self {
        Self {
            data,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
