//! Base64 payload decoding (pipeline stage 2)

use super::PipelineError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Import type tag selecting this decoder
pub const BASE64_IMPORT_TYPE: &str = "base64_encoded_data";

/// Decodes standard (RFC 4648) base64 payloads.
///
/// Malformed input is rejected up front rather than decoded leniently:
/// a payload with characters outside the base64 alphabet, a length
/// that is not a multiple of four, or bad padding never reaches the
/// decode step.
pub struct Base64Decoder;

impl Base64Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, PipelineError> {
        if !Self::is_well_formed(encoded) {
            return Err(Self::invalid());
        }
        // The strict engine still rejects non-canonical padding bits.
        STANDARD.decode(encoded).map_err(|_| Self::invalid())
    }

    /// Syntactic check: alphabet, length, and padding placement
    fn is_well_formed(encoded: &str) -> bool {
        if encoded.len() % 4 != 0 {
            return false;
        }
        let trimmed = encoded.trim_end_matches('=');
        if encoded.len() - trimmed.len() > 2 {
            return false;
        }
        trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    }

    fn invalid() -> PipelineError {
        PipelineError::InvalidRequest("Base64 import data string is invalid.".to_string())
    }
}

impl Default for Base64Decoder {
    fn default() -> Self {
        Self::new()
    }
}
