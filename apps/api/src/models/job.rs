//! Normalized job-listing records — the job side of a match.

use serde::{Deserialize, Serialize};

/// A job listing, either normalized from the JSearch API or supplied directly
/// by the caller. `requirements` holds free-text lines; matching treats each
/// line as an opaque string. A listing with no requirements is valid input,
/// not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub remote: bool,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub apply_url: Option<String>,
    pub source: Option<String>,
    pub posted_date: Option<String>,
}
