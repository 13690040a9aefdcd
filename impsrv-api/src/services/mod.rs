//! Ingestion pipeline services
//!
//! One service per pipeline stage: request validation, payload
//! decoding, source persistence, plus the composing pipeline itself.

pub mod base64_decoder;
pub mod pipeline;
pub mod request_validator;
pub mod source_persister;

pub use base64_decoder::{Base64Decoder, BASE64_IMPORT_TYPE};
pub use pipeline::ImportPipeline;
pub use request_validator::RequestValidator;
pub use source_persister::SourcePersister;

use thiserror::Error;

/// Error raised by a pipeline stage
///
/// `InvalidRequest` and `Persistence` are recovered at the pipeline
/// boundary into a failed `ImportResponse`; the `Display` text is the
/// user-facing message. `Infrastructure` is not recovered: it
/// propagates out of the pipeline as a hard fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// Malformed or missing required input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Underlying storage failure during write
    #[error("Failed to persist import source: {0}")]
    Persistence(String),

    /// Unexpected runtime failure (e.g. a crashed write task);
    /// never reported as a structured failed result
    #[error("Internal error: {0}")]
    Infrastructure(String),
}
