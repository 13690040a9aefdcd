//! Request shape validation (pipeline stage 1)

use super::{PipelineError, BASE64_IMPORT_TYPE};
use crate::models::ImportRequest;

/// Validates that an import request carries everything the later
/// stages need. Pure check, no side effects.
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, request: &ImportRequest) -> Result<(), PipelineError> {
        match request.import_data.as_deref() {
            None => {
                return Err(PipelineError::InvalidRequest(
                    "Import data must be provided.".to_string(),
                ))
            }
            Some("") => {
                return Err(PipelineError::InvalidRequest(
                    "Import data must not be empty.".to_string(),
                ))
            }
            Some(_) => {}
        }

        if request.source_type.is_empty() {
            return Err(PipelineError::InvalidRequest(
                "Source type must be provided.".to_string(),
            ));
        }
        // The source type becomes the staged file's extension, so it
        // must be a plain token with no path separators.
        if !request
            .source_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
        {
            return Err(PipelineError::InvalidRequest(format!(
                "Source type {} is not a valid file type.",
                request.source_type
            )));
        }

        if request.import_type != BASE64_IMPORT_TYPE {
            return Err(PipelineError::InvalidRequest(format!(
                "Import type {} is not supported.",
                request.import_type
            )));
        }

        Ok(())
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}
