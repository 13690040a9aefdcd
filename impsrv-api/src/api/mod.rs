//! HTTP API handlers for impsrv-api

pub mod health;
pub mod source;

pub use health::health_routes;
pub use source::source_routes;
