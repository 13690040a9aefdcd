//! Import source API handlers
//!
//! POST /import/source

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{ImportOutcome, ImportResponse, SourceEnvelope},
    services::ImportPipeline,
    AppState,
};

/// POST /import/source
///
/// Runs the ingestion pipeline on the submitted payload. Validation
/// and persistence failures come back as a structured failed result
/// with HTTP 200; only malformed JSON or infrastructure faults map to
/// error status codes.
pub async fn create_source(
    State(state): State<AppState>,
    Json(envelope): Json<SourceEnvelope>,
) -> ApiResult<Json<ImportResponse>> {
    let pipeline = ImportPipeline::new(state.staging.clone());
    let outcome = pipeline
        .run(envelope.source)
        .await
        .map_err(|fault| ApiError::Internal(fault.to_string()))?;

    if let ImportOutcome::Failed(ref message) = outcome {
        *state.last_error.write().await = Some(message.clone());
    }

    Ok(Json(outcome.into()))
}

/// Build import source routes
pub fn source_routes() -> Router<AppState> {
    Router::new().route("/import/source", post(create_source))
}
