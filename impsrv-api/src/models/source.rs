//! Import source request and result types
//!
//! The wire shape keeps nullable `error`/`source` fields for
//! compatibility with the import-source API contract, but internally
//! the pipeline produces a tagged [`ImportOutcome`] so that "exactly
//! one of source/error is set" holds by construction.

use serde::{Deserialize, Serialize};

/// POST /import/source request body envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEnvelope {
    pub source: ImportRequest,
}

/// An import-source creation request
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    /// File type tag of the payload (e.g. "csv"); becomes the stored
    /// file's extension
    pub source_type: String,

    /// Selects the decoding strategy for `import_data`
    pub import_type: String,

    /// The encoded payload; absent or null fails validation
    #[serde(default)]
    pub import_data: Option<String>,
}

/// Terminal status of an import-source request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Uploaded,
    Failed,
}

/// A persisted import artifact
///
/// `import_data` holds the file handle relative to the staging root;
/// `staging_root.join(&source.import_data)` locates the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub import_data: String,
}

/// Pipeline outcome: either a persisted source or a user-facing
/// failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Uploaded(Source),
    Failed(String),
}

/// POST /import/source response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: SourceStatus,
    pub error: Option<String>,
    pub source: Option<Source>,
}

impl From<ImportOutcome> for ImportResponse {
    fn from(outcome: ImportOutcome) -> Self {
        match outcome {
            ImportOutcome::Uploaded(source) => ImportResponse {
                status: SourceStatus::Uploaded,
                error: None,
                source: Some(source),
            },
            ImportOutcome::Failed(message) => ImportResponse {
                status: SourceStatus::Failed,
                error: Some(message),
                source: None,
            },
        }
    }
}
