//! Sequential composition of the ingestion stages
//!
//! Validator → decoder → persister, each stage short-circuiting. All
//! stage errors are recovered here into a failed [`ImportOutcome`];
//! nothing escapes to the HTTP layer as a protocol fault.

use super::{Base64Decoder, PipelineError, RequestValidator, SourcePersister};
use crate::models::{ImportOutcome, ImportRequest, Source};
use impsrv_common::StagingArea;
use std::sync::Arc;

/// The import-source ingestion pipeline
pub struct ImportPipeline {
    validator: RequestValidator,
    decoder: Base64Decoder,
    persister: SourcePersister,
}

impl ImportPipeline {
    pub fn new(staging: Arc<dyn StagingArea>) -> Self {
        Self {
            validator: RequestValidator::new(),
            decoder: Base64Decoder::new(),
            persister: SourcePersister::new(staging),
        }
    }

    /// Run one request through the pipeline
    ///
    /// Consumes the request, produces exactly one outcome. No retries;
    /// a failed request must be resubmitted in full. Validation and
    /// storage errors come back as `ImportOutcome::Failed`; only
    /// infrastructure faults surface as `Err`.
    pub async fn run(&self, request: ImportRequest) -> Result<ImportOutcome, PipelineError> {
        match self.execute(&request).await {
            Ok(source) => {
                tracing::info!(
                    source_type = %request.source_type,
                    handle = %source.import_data,
                    "Import source uploaded"
                );
                Ok(ImportOutcome::Uploaded(source))
            }
            Err(fault @ PipelineError::Infrastructure(_)) => {
                tracing::error!(
                    source_type = %request.source_type,
                    error = %fault,
                    "Import source pipeline fault"
                );
                Err(fault)
            }
            Err(err) => {
                tracing::warn!(
                    source_type = %request.source_type,
                    error = %err,
                    "Import source rejected"
                );
                Ok(ImportOutcome::Failed(err.to_string()))
            }
        }
    }

    async fn execute(&self, request: &ImportRequest) -> Result<Source, PipelineError> {
        self.validator.validate(request)?;

        // Validation guarantees import_data is present past this point
        let encoded = request.import_data.as_deref().unwrap_or_default();
        let bytes = self.decoder.decode(encoded)?;

        self.persister.persist(bytes, &request.source_type).await
    }
}
