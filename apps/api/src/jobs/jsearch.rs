//! JSearch (RapidAPI) client for fetching job listings.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::jobs::normalizer::RawJob;

const JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSearch API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Search filters accepted by the JSearch `/search` endpoint. Doubles as the
/// query-string shape of `GET /api/v1/jobs/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub location: Option<String>,
    #[serde(default)]
    pub remote_jobs_only: bool,
    /// Comma-separated: FULLTIME, CONTRACTOR, PARTTIME, INTERN.
    pub employment_types: Option<String>,
    /// One of: all, today, 3days, week, month. Defaults to "all".
    pub date_posted: Option<String>,
    pub num_pages: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawJob>,
}

/// Thin client over the JSearch REST API.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: String,
}

impl JSearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Searches for listings. Returns raw JSearch payloads; see `normalizer`
    /// for the schema mapping.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RawJob>, JobSearchError> {
        let mut params: Vec<(&str, String)> = vec![
            ("query", query.query.clone()),
            ("num_pages", query.num_pages.unwrap_or(1).to_string()),
            ("page", query.page.unwrap_or(1).to_string()),
            (
                "date_posted",
                query
                    .date_posted
                    .clone()
                    .unwrap_or_else(|| "all".to_string()),
            ),
        ];

        if let Some(location) = &query.location {
            params.push(("location", location.clone()));
        }
        if query.remote_jobs_only {
            params.push(("remote_jobs_only", "true".to_string()));
        }
        if let Some(types) = &query.employment_types {
            params.push(("employment_types", types.clone()));
        }

        let body: SearchResponse = self.get("/search", &params).await?;
        debug!(count = body.data.len(), "JSearch returned listings");
        Ok(body.data)
    }

    /// Fetches full details for one listing by JSearch job id.
    pub async fn job_details(&self, job_id: &str) -> Result<Option<RawJob>, JobSearchError> {
        let params = vec![("job_id", job_id.to_string())];
        let body: SearchResponse = self.get("/job-details", &params).await?;
        Ok(body.data.into_iter().next())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, JobSearchError> {
        let response = self
            .client
            .get(format!("{JSEARCH_BASE_URL}{path}"))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(JobSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
