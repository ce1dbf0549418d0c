//! Axum route handlers for the Match API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::matching::scorer::MatchResult;
use crate::models::job::Job;
use crate::models::profile::Profile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: Profile,
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub result: MatchResult,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub profile: Profile,
    pub jobs: Vec<Job>,
}

/// One scored job in a batch response, tagged with enough listing metadata
/// for the caller's upsert key.
#[derive(Debug, Serialize)]
pub struct JobMatch {
    pub external_id: Option<String>,
    pub job_title: String,
    pub company: String,
    pub result: MatchResult,
}

#[derive(Debug, Serialize)]
pub struct BatchMatchResponse {
    pub count: usize,
    pub results: Vec<JobMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores one profile against one job with the configured backend. The
/// signature is deliberately infallible: missing skills or requirements are
/// valid input, and refinement failures only surface in `notes`.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let result = state.scorer.score(&request.profile, &request.job).await;
    Json(MatchResponse { result })
}

/// POST /api/v1/match/batch
///
/// Scores one profile against every job in the request, in order. Jobs are
/// scored synchronously one after another; a degraded result for one job
/// never aborts the rest of the batch.
pub async fn handle_match_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchMatchRequest>,
) -> Json<BatchMatchResponse> {
    let mut results = Vec::with_capacity(request.jobs.len());

    for job in &request.jobs {
        let result = state.scorer.score(&request.profile, job).await;
        results.push(JobMatch {
            external_id: job.external_id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            result,
        });
    }

    Json(BatchMatchResponse {
        count: results.len(),
        results,
    })
}
