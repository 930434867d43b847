use axum::{routing::post, Router};

use crate::{handlers::*, AppState};

pub fn create_job_routes() -> Router<AppState> {
    Router::new()
        .route("/run-job", post(run_job))
        .route("/validate-job", post(validate_job))
}
