//! Axum route handlers for the Jobs API.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::jsearch::SearchQuery;
use crate::jobs::normalizer::{job_summary, normalize_job};
use crate::models::job::Job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SearchJobsResponse {
    pub count: usize,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct JobDetailsResponse {
    pub job: Job,
    pub summary: String,
}

/// GET /api/v1/jobs/search
///
/// Proxies the JSearch API and returns normalized listings, ready to feed
/// straight into the match endpoints.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchJobsResponse>, AppError> {
    if query.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let client = state.jobs.as_ref().ok_or(AppError::JobSearchDisabled)?;

    let raw = client
        .search(&query)
        .await
        .map_err(|e| AppError::JobSearch(e.to_string()))?;

    let jobs: Vec<Job> = raw.into_iter().map(normalize_job).collect();

    Ok(Json(SearchJobsResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/:job_id
///
/// Fetches one listing by JSearch id and returns it normalized, with a
/// human-readable summary block.
pub async fn handle_job_details(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobDetailsResponse>, AppError> {
    let client = state.jobs.as_ref().ok_or(AppError::JobSearchDisabled)?;

    let raw = client
        .job_details(&job_id)
        .await
        .map_err(|e| AppError::JobSearch(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let job = normalize_job(raw);
    let summary = job_summary(&job);

    Ok(Json(JobDetailsResponse { job, summary }))
}
