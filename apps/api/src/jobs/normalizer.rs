//! Normalizes raw JSearch payloads into `Job` records.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::job::Job;

/// A listing as returned by the JSearch API. Only the fields the normalizer
/// reads are declared; everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawJob {
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub employer_name: Option<String>,
    pub job_city: Option<String>,
    pub job_state: Option<String>,
    pub job_country: Option<String>,
    pub job_location: Option<String>,
    pub job_is_remote: Option<bool>,
    pub job_description: Option<String>,
    pub job_required_skills: Option<Vec<String>>,
    pub job_highlights: Option<JobHighlights>,
    pub job_required_experience: Option<RequiredExperience>,
    pub job_min_salary: Option<f64>,
    pub job_max_salary: Option<f64>,
    pub job_apply_link: Option<String>,
    pub job_google_link: Option<String>,
    pub job_publisher: Option<String>,
    pub job_posted_at_datetime_utc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobHighlights {
    #[serde(rename = "Qualifications")]
    pub qualifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredExperience {
    pub required_experience_in_months: Option<f64>,
}

/// Maps one raw listing onto the `Job` schema.
///
/// Requirements are assembled from `job_required_skills`, then
/// `job_highlights.Qualifications`, then a synthesized line for the required
/// experience, so the scorer sees every signal the API exposes.
pub fn normalize_job(raw: RawJob) -> Job {
    let location_parts: Vec<&str> = [&raw.job_city, &raw.job_state, &raw.job_country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    let location = if location_parts.is_empty() {
        raw.job_location.unwrap_or_else(|| "N/A".to_string())
    } else {
        location_parts.join(", ")
    };

    let mut requirements: Vec<String> = raw.job_required_skills.unwrap_or_default();
    if let Some(qualifications) = raw.job_highlights.and_then(|h| h.qualifications) {
        requirements.extend(qualifications);
    }
    if let Some(months) = raw
        .job_required_experience
        .and_then(|e| e.required_experience_in_months)
    {
        requirements.push(format!(
            "{:.1} years of experience required",
            months / 12.0
        ));
    }

    let posted_date = raw
        .job_posted_at_datetime_utc
        .as_deref()
        .map(normalize_posted_date);

    Job {
        external_id: raw.job_id,
        title: raw.job_title.unwrap_or_else(|| "Untitled".to_string()),
        company: raw.employer_name.unwrap_or_else(|| "Unknown".to_string()),
        location,
        remote: raw.job_is_remote.unwrap_or(false),
        description: raw.job_description.unwrap_or_default(),
        requirements,
        salary_min: raw.job_min_salary,
        salary_max: raw.job_max_salary,
        apply_url: raw.job_apply_link.or(raw.job_google_link),
        source: Some(raw.job_publisher.unwrap_or_else(|| "JSearch".to_string())),
        posted_date,
    }
}

/// Normalizes an ISO timestamp to `YYYY-MM-DD`, falling back to the first
/// ten characters when the timestamp does not parse.
fn normalize_posted_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.chars().take(10).collect(),
    }
}

/// Human-readable summary block for one listing.
pub fn job_summary(job: &Job) -> String {
    let mut lines = vec![
        format!("Title: {}", job.title),
        format!("Company: {}", job.company),
        format!("Location: {}", job.location),
    ];

    if job.remote {
        lines.push("Remote: Yes".to_string());
    }

    if job.salary_min.is_some() || job.salary_max.is_some() {
        let range: Vec<String> = [job.salary_min, job.salary_max]
            .iter()
            .flatten()
            .map(|amount| format!("${amount:.0}"))
            .collect();
        lines.push(format!("Salary: {}", range.join(" - ")));
    }

    if let Some(date) = &job.posted_date {
        lines.push(format!("Posted: {date}"));
    }

    if !job.requirements.is_empty() {
        lines.push(format!("Requirements: {} listed", job.requirements.len()));
    }

    lines.join("\n")
}
