pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as job_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(match_handlers::handle_match))
        .route(
            "/api/v1/match/batch",
            post(match_handlers::handle_match_batch),
        )
        // Jobs API
        .route("/api/v1/jobs/search", get(job_handlers::handle_search_jobs))
        .route("/api/v1/jobs/:job_id", get(job_handlers::handle_job_details))
        .with_state(state)
}
