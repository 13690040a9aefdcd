//! # impsrv Common Library
//!
//! Shared code for the import-source service:
//! - Error types
//! - Root folder / config resolution
//! - Staging-area filesystem collaborator

pub mod config;
pub mod error;
pub mod staging;

pub use error::{Error, Result};
pub use staging::{StagingArea, VarStaging};
