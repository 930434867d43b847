//! Price Job Handlers
//!
//! Every job failure collapses to one generic message for the caller; the
//! specific error is only logged.

use axum::{extract::State, http::StatusCode, response::Json};

use crate::AppState;
use pricecheck_models::{ErrorBody, JobRequest, JobResponse, ValidationPreview};
use pricecheck_utils::{log_error, validate_model, PriceCheckError};

type HandlerError = (StatusCode, Json<ErrorBody>);

const JOB_FAILED: &str = "Job failed";
const MISSING_PARAMETERS: &str = "Missing parameters";

/// Run a price job for an uploaded file
///
/// POST /run-job
pub async fn run_job(
    State(state): State<AppState>,
    payload: Option<Json<JobRequest>>,
) -> Result<Json<JobResponse>, HandlerError> {
    let request = require_request(payload)?;

    let results = state
        .price_job
        .run(&request.user_id, &request.file_path, &request.file_name)
        .await
        .map_err(|err| {
            log_error!(err, "Price job failed", user_id = %request.user_id, file_path = %request.file_path);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, JOB_FAILED)
        })?;

    Ok(Json(JobResponse { results }))
}

/// Validate an uploaded file without looking up prices
///
/// POST /validate-job
pub async fn validate_job(
    State(state): State<AppState>,
    payload: Option<Json<JobRequest>>,
) -> Result<Json<ValidationPreview>, HandlerError> {
    let request = require_request(payload)?;

    let rows = state
        .price_job
        .preview(&request.file_path, &request.file_name)
        .await
        .map_err(|err| {
            log_error!(err, "Upload validation failed", file_path = %request.file_path);
            match err {
                // Content problems are the caller's to fix, so say what they are
                PriceCheckError::Parse { .. } | PriceCheckError::Schema { .. } => {
                    error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, JOB_FAILED),
            }
        })?;

    Ok(Json(ValidationPreview { rows }))
}

fn require_request(payload: Option<Json<JobRequest>>) -> Result<JobRequest, HandlerError> {
    let Some(Json(request)) = payload else {
        return Err(error_response(StatusCode::BAD_REQUEST, MISSING_PARAMETERS));
    };

    validate_model(&request).map_err(|err| {
        tracing::warn!(error = %err, "Rejected job request");
        error_response(StatusCode::BAD_REQUEST, MISSING_PARAMETERS)
    })?;

    Ok(request)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (status, Json(ErrorBody::new(message)))
}
