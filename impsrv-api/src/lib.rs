//! impsrv-api library interface
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use impsrv_common::StagingArea;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Staging area the persister writes into
    pub staging: Arc<dyn StagingArea>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last rejected-import message for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(staging: Arc<dyn StagingArea>) -> Self {
        Self {
            staging,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::source_routes())
        .merge(api::health_routes())
        .with_state(state)
}
