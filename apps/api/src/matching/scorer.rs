//! Match Scorer — profile-to-job compatibility scoring.
//!
//! Two backends behind the `MatchScorer` trait: `SkillOverlapScorer` (pure,
//! deterministic) and `LlmMatchScorer` (Claude-refined, keeping the overlap
//! result on any refinement failure). Scoring never returns an error to the
//! caller; degraded fidelity is visible only in `notes`.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, picked at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{MATCH_ANALYSIS_PROMPT_TEMPLATE, MATCH_ANALYSIS_SYSTEM};
use crate::matching::taxonomy;
use crate::models::job::Job;
use crate::models::profile::{Profile, SkillLevel};

/// Neutral score used when a job lists no requirements at all.
const NO_REQUIREMENTS_SCORE: f64 = 50.0;
/// Added per advanced matched skill, clamped at the score ceiling.
const ADVANCED_SKILL_BONUS: f64 = 5.0;
/// Requirements at or under this many characters are noise (bare acronyms)
/// and are never reported as missing.
const MISSING_REQUIREMENT_MIN_CHARS: usize = 3;
/// The missing list stops at this many requirements.
const MAX_MISSING_SKILLS: usize = 10;
/// Refinement is only attempted strictly above this overlap score, or when at
/// least one skill matched.
const REFINEMENT_SCORE_FLOOR: f64 = 30.0;

// Bounds for the refinement prompt summaries.
const MAX_PROMPT_SKILLS: usize = 15;
const MAX_PROMPT_EXPERIENCE: usize = 5;
const MAX_PROMPT_REQUIREMENTS: usize = 10;
const MAX_PROMPT_DESCRIPTION_CHARS: usize = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// The result of scoring one profile against one job. Created fresh on every
/// call and never mutated afterwards; persistence (upsert per profile/job
/// pair) is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0–100 compatibility estimate.
    pub match_score: f64,
    /// Profile-side skill names, in profile order, each at most once.
    pub matched_skills: Vec<String>,
    /// Uncovered job requirements, in requirement order, at most ten.
    pub missing_skills: Vec<String>,
    pub notes: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A match scorer backend. Carried in `AppState` as `Arc<dyn MatchScorer>`.
///
/// `score` is infallible by contract: every input shape produces a complete,
/// well-formed result.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, profile: &Profile, job: &Job) -> MatchResult;
}

/// Deterministic skill-overlap backend. No LLM call.
pub struct SkillOverlapScorer;

#[async_trait]
impl MatchScorer for SkillOverlapScorer {
    async fn score(&self, profile: &Profile, job: &Job) -> MatchResult {
        skill_overlap_result(profile, job)
    }
}

/// Claude-refined backend. Computes the overlap result first and keeps it
/// whenever the refinement call fails or returns an unusable response.
pub struct LlmMatchScorer {
    llm: LlmClient,
}

impl LlmMatchScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, profile: &Profile, job: &Job) -> MatchResult {
        let mut result = skill_overlap_result(profile, job);

        if !should_refine(&result) {
            debug!(
                score = result.match_score,
                "skipping LLM refinement for weak overlap"
            );
            return result;
        }

        match analyze_match(&self.llm, profile, job).await {
            Ok(analysis) => apply_analysis(&mut result, analysis),
            Err(err) => {
                warn!("match refinement failed, keeping overlap score: {err}");
                append_failure_note(&mut result, &err);
            }
        }

        result
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill-overlap algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Computes the deterministic overlap result.
///
/// Score is the matched-to-requirement ratio (not matched-to-profile: a
/// profile with many irrelevant skills is not penalized), plus a bonus per
/// advanced matched skill, clamped into [0, 100]. A job with no requirements
/// scores the neutral midpoint.
pub fn skill_overlap_result(profile: &Profile, job: &Job) -> MatchResult {
    let skill_names: Vec<String> = profile
        .skills
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| s.name.clone())
        .collect();

    let matched = taxonomy::matched_skills(&skill_names, &job.requirements);

    let mut score = if job.requirements.is_empty() {
        NO_REQUIREMENTS_SCORE
    } else {
        let ratio = matched.len() as f64 / job.requirements.len() as f64;
        (ratio * 100.0).min(100.0)
    };

    // Clamp after each increment; the ceiling holds regardless of how many
    // advanced skills matched.
    for skill in &profile.skills {
        if skill.level == SkillLevel::Advanced && matched.contains(&skill.name) {
            score = (score + ADVANCED_SKILL_BONUS).min(100.0);
        }
    }

    let missing = missing_requirements(&matched, &job.requirements);
    let notes = format!("Basic skill match: {} skills matched", matched.len());

    MatchResult {
        match_score: score,
        matched_skills: matched,
        missing_skills: missing,
        notes,
    }
}

/// Requirements not covered by any matched skill, in original order.
///
/// A matched skill covers a requirement when its normalized name is a
/// substring of the normalized requirement text. Requirements of three
/// characters or fewer are skipped entirely, and the list stops at ten
/// entries.
fn missing_requirements(matched: &[String], requirements: &[String]) -> Vec<String> {
    let mut missing = Vec::new();

    for req in requirements {
        if req.chars().count() <= MISSING_REQUIREMENT_MIN_CHARS {
            continue;
        }

        let req_normalized = taxonomy::normalize(req);
        let covered = matched
            .iter()
            .any(|skill| req_normalized.contains(&taxonomy::normalize(skill)));

        if !covered {
            missing.push(req.clone());
            if missing.len() == MAX_MISSING_SKILLS {
                break;
            }
        }
    }

    missing
}

// ────────────────────────────────────────────────────────────────────────────
// LLM refinement
// ────────────────────────────────────────────────────────────────────────────

/// Parsed shape of the recruiter-analysis verdict. `score` is mandatory —
/// a response without one is a refinement failure, not a half-applied result.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchAnalysis {
    pub score: f64,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// Whether the refinement call is worth attempting for an overlap result.
fn should_refine(result: &MatchResult) -> bool {
    result.match_score > REFINEMENT_SCORE_FLOOR || !result.matched_skills.is_empty()
}

/// Asks Claude for a refined verdict. Every failure mode — transport, API
/// status, unparseable body — collapses into `LlmError` so the caller falls
/// back in a single branch.
async fn analyze_match(
    llm: &LlmClient,
    profile: &Profile,
    job: &Job,
) -> Result<MatchAnalysis, LlmError> {
    let prompt = build_match_prompt(profile, job)?;
    llm.call_json::<MatchAnalysis>(&prompt, MATCH_ANALYSIS_SYSTEM)
        .await
}

/// Folds a successful refinement into the overlap result. The refined score
/// replaces the overlap score (clamped into range); matched/missing keep the
/// overlap values — the narrative verdict does not rewrite the skill lists.
fn apply_analysis(result: &mut MatchResult, analysis: MatchAnalysis) {
    result.match_score = analysis.score.clamp(0.0, 100.0);

    let mut notes = analysis.analysis;
    if !analysis.strengths.is_empty() {
        notes.push_str("\n\nStrengths:\n");
        notes.push_str(&bullet_list(&analysis.strengths));
    }
    if !analysis.concerns.is_empty() {
        notes.push_str("\n\nConcerns:\n");
        notes.push_str(&bullet_list(&analysis.concerns));
    }
    result.notes = notes;
}

/// Marks a failed refinement in the notes. The overlap result itself is left
/// untouched; this suffix is the only signal the caller gets.
fn append_failure_note(result: &mut MatchResult, err: &LlmError) {
    result
        .notes
        .push_str(&format!("\n(LLM analysis unavailable: {err})"));
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt summaries (bounded views of profile and job)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SkillSummary<'a> {
    name: &'a str,
    level: SkillLevel,
    years: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ExperienceSummary<'a> {
    title: &'a str,
    company: Option<&'a str>,
    years: String,
}

#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    name: Option<&'a str>,
    summary: Option<&'a str>,
    skills: Vec<SkillSummary<'a>>,
    experience: Vec<ExperienceSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct JobSummary<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    remote: bool,
    requirements: &'a [String],
    description: String,
}

fn profile_summary(profile: &Profile) -> ProfileSummary<'_> {
    ProfileSummary {
        name: profile.name.as_deref(),
        summary: profile.summary.as_deref(),
        skills: profile
            .skills
            .iter()
            .take(MAX_PROMPT_SKILLS)
            .map(|s| SkillSummary {
                name: &s.name,
                level: s.level,
                years: s.years,
            })
            .collect(),
        experience: profile
            .experience
            .iter()
            .take(MAX_PROMPT_EXPERIENCE)
            .map(|e| ExperienceSummary {
                title: &e.title,
                company: e.company.as_deref(),
                years: format!(
                    "{} to {}",
                    e.start_date.as_deref().unwrap_or("unknown"),
                    e.end_date.as_deref().unwrap_or("present")
                ),
            })
            .collect(),
    }
}

fn job_summary(job: &Job) -> JobSummary<'_> {
    let req_count = job.requirements.len().min(MAX_PROMPT_REQUIREMENTS);
    JobSummary {
        title: &job.title,
        company: &job.company,
        location: &job.location,
        remote: job.remote,
        requirements: &job.requirements[..req_count],
        description: job
            .description
            .chars()
            .take(MAX_PROMPT_DESCRIPTION_CHARS)
            .collect(),
    }
}

fn build_match_prompt(profile: &Profile, job: &Job) -> Result<String, serde_json::Error> {
    let profile_json = serde_json::to_string_pretty(&profile_summary(profile))?;
    let job_json = serde_json::to_string_pretty(&job_summary(job))?;
    Ok(MATCH_ANALYSIS_PROMPT_TEMPLATE
        .replace("{profile_json}", &profile_json)
        .replace("{job_json}", &job_json))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Skill;

    fn make_skill(name: &str, level: SkillLevel, years: Option<f64>) -> Skill {
        Skill {
            name: name.to_string(),
            category: Default::default(),
            level,
            years,
        }
    }

    fn make_profile(skills: Vec<Skill>) -> Profile {
        Profile {
            skills,
            ..Default::default()
        }
    }

    fn make_job(requirements: &[&str]) -> Job {
        Job {
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn data_analyst_profile() -> Profile {
        make_profile(vec![
            make_skill("Python", SkillLevel::Advanced, Some(5.0)),
            make_skill("SQL", SkillLevel::Advanced, Some(4.0)),
            make_skill("Tableau", SkillLevel::Intermediate, Some(2.0)),
        ])
    }

    fn data_analyst_job() -> Job {
        make_job(&[
            "5+ years Python experience",
            "Strong SQL skills",
            "Experience with data visualization tools",
            "Knowledge of cloud platforms (AWS/Azure)",
        ])
    }

    #[test]
    fn test_empty_requirements_scores_neutral_midpoint() {
        let result = skill_overlap_result(&data_analyst_profile(), &make_job(&[]));
        assert_eq!(result.match_score, 50.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_data_analyst_scenario() {
        let result = skill_overlap_result(&data_analyst_profile(), &data_analyst_job());

        // 2/4 requirements matched = 50, plus 5 per advanced matched skill.
        assert_eq!(result.match_score, 60.0);
        assert_eq!(result.matched_skills, vec!["Python", "SQL"]);
        assert!(result
            .missing_skills
            .contains(&"Knowledge of cloud platforms (AWS/Azure)".to_string()));
        assert!(!result
            .missing_skills
            .contains(&"Strong SQL skills".to_string()));
        assert_eq!(result.notes, "Basic skill match: 2 skills matched");
    }

    #[test]
    fn test_score_never_exceeds_ceiling() {
        let profile = make_profile(vec![make_skill("Python", SkillLevel::Advanced, None)]);
        let result = skill_overlap_result(&profile, &make_job(&["Python"]));
        // Full ratio already hits 100; the advanced bonus must not push past it.
        assert_eq!(result.match_score, 100.0);
    }

    #[test]
    fn test_advanced_bonus_applies_per_matched_skill() {
        let result = skill_overlap_result(&data_analyst_profile(), &data_analyst_job());
        let no_bonus_profile = make_profile(vec![
            make_skill("Python", SkillLevel::Intermediate, Some(5.0)),
            make_skill("SQL", SkillLevel::Intermediate, Some(4.0)),
        ]);
        let no_bonus = skill_overlap_result(&no_bonus_profile, &data_analyst_job());
        assert_eq!(result.match_score - no_bonus.match_score, 10.0);
    }

    #[test]
    fn test_advanced_unmatched_skill_earns_no_bonus() {
        let profile = make_profile(vec![
            make_skill("Python", SkillLevel::Intermediate, None),
            make_skill("Haskell", SkillLevel::Advanced, None),
        ]);
        let result = skill_overlap_result(&profile, &make_job(&["Python", "Kafka"]));
        assert_eq!(result.match_score, 50.0);
    }

    #[test]
    fn test_adding_matching_skill_never_shrinks_matches() {
        let job = data_analyst_job();
        let before = skill_overlap_result(&data_analyst_profile(), &job);

        let mut profile = data_analyst_profile();
        profile
            .skills
            .push(make_skill("AWS", SkillLevel::Intermediate, None));
        let after = skill_overlap_result(&profile, &job);

        assert!(after.matched_skills.len() >= before.matched_skills.len());
    }

    #[test]
    fn test_irrelevant_skills_do_not_lower_the_score() {
        let mut profile = data_analyst_profile();
        let before = skill_overlap_result(&profile, &data_analyst_job());
        profile
            .skills
            .push(make_skill("Basket weaving", SkillLevel::Advanced, None));
        let after = skill_overlap_result(&profile, &data_analyst_job());
        assert_eq!(before.match_score, after.match_score);
    }

    #[test]
    fn test_short_requirements_never_reported_missing() {
        let result = skill_overlap_result(&make_profile(vec![]), &make_job(&["Go", "R", "C++"]));
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.match_score, 0.0);
    }

    #[test]
    fn test_missing_list_caps_at_ten() {
        let reqs: Vec<String> = (0..15).map(|i| format!("requirement number {i}")).collect();
        let req_refs: Vec<&str> = reqs.iter().map(|r| r.as_str()).collect();
        let result = skill_overlap_result(&make_profile(vec![]), &make_job(&req_refs));
        assert_eq!(result.missing_skills.len(), 10);
        assert_eq!(result.missing_skills[0], "requirement number 0");
        assert_eq!(result.missing_skills[9], "requirement number 9");
    }

    #[test]
    fn test_empty_skill_names_are_ignored() {
        let profile = make_profile(vec![make_skill("", SkillLevel::Advanced, None)]);
        let result = skill_overlap_result(&profile, &make_job(&["Python required"]));
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.match_score, 0.0);
    }

    #[test]
    fn test_empty_profile_against_empty_job() {
        let result = skill_overlap_result(&Profile::default(), &Job::default());
        assert_eq!(result.match_score, 50.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_refinement_gate_requires_score_or_matches() {
        let weak = MatchResult {
            match_score: 0.0,
            matched_skills: vec![],
            missing_skills: vec![],
            notes: String::new(),
        };
        assert!(!should_refine(&weak));

        let at_floor = MatchResult {
            match_score: 30.0,
            ..weak.clone()
        };
        assert!(!should_refine(&at_floor), "floor is strict");

        let above_floor = MatchResult {
            match_score: 30.5,
            ..weak.clone()
        };
        assert!(should_refine(&above_floor));

        let low_but_matched = MatchResult {
            match_score: 10.0,
            matched_skills: vec!["Python".to_string()],
            ..weak
        };
        assert!(should_refine(&low_but_matched));
    }

    #[test]
    fn test_apply_analysis_replaces_score_and_notes_but_keeps_lists() {
        let mut result = skill_overlap_result(&data_analyst_profile(), &data_analyst_job());
        let matched_before = result.matched_skills.clone();
        let missing_before = result.missing_skills.clone();

        apply_analysis(
            &mut result,
            MatchAnalysis {
                score: 78.0,
                analysis: "Strong fit overall.".to_string(),
                strengths: vec!["Deep Python experience".to_string()],
                concerns: vec!["No cloud exposure".to_string()],
            },
        );

        assert_eq!(result.match_score, 78.0);
        assert_eq!(result.matched_skills, matched_before);
        assert_eq!(result.missing_skills, missing_before);
        assert!(result.notes.starts_with("Strong fit overall."));
        assert!(result.notes.contains("Strengths:\n- Deep Python experience"));
        assert!(result.notes.contains("Concerns:\n- No cloud exposure"));
    }

    #[test]
    fn test_apply_analysis_clamps_out_of_range_scores() {
        let mut result = skill_overlap_result(&data_analyst_profile(), &data_analyst_job());
        apply_analysis(
            &mut result,
            MatchAnalysis {
                score: 150.0,
                analysis: String::new(),
                strengths: vec![],
                concerns: vec![],
            },
        );
        assert_eq!(result.match_score, 100.0);

        apply_analysis(
            &mut result,
            MatchAnalysis {
                score: -5.0,
                analysis: String::new(),
                strengths: vec![],
                concerns: vec![],
            },
        );
        assert_eq!(result.match_score, 0.0);
    }

    #[test]
    fn test_failed_refinement_keeps_overlap_result_and_appends_diagnostic() {
        let mut result = skill_overlap_result(&data_analyst_profile(), &data_analyst_job());
        let score_before = result.match_score;

        append_failure_note(&mut result, &LlmError::EmptyContent);

        assert_eq!(result.match_score, score_before);
        assert!(result.notes.starts_with("Basic skill match:"));
        assert!(result.notes.contains("LLM analysis unavailable"));
    }

    #[test]
    fn test_match_analysis_requires_score_field() {
        let err = serde_json::from_str::<MatchAnalysis>(r#"{"analysis": "looks fine"}"#);
        assert!(err.is_err());

        let ok: MatchAnalysis = serde_json::from_str(r#"{"score": 72}"#).unwrap();
        assert_eq!(ok.score, 72.0);
        assert!(ok.strengths.is_empty());
        assert!(ok.concerns.is_empty());
    }

    #[test]
    fn test_profile_summary_is_bounded() {
        let skills = (0..30)
            .map(|i| make_skill(&format!("skill-{i}"), SkillLevel::Beginner, None))
            .collect();
        let mut profile = make_profile(skills);
        profile.experience = (0..8)
            .map(|i| crate::models::profile::Experience {
                title: format!("role-{i}"),
                ..Default::default()
            })
            .collect();

        let summary = profile_summary(&profile);
        assert_eq!(summary.skills.len(), 15);
        assert_eq!(summary.experience.len(), 5);
    }

    #[test]
    fn test_job_summary_truncates_description_and_requirements() {
        let mut job = make_job(&[
            "r1 long enough",
            "r2 long enough",
            "r3",
            "r4",
            "r5",
            "r6",
            "r7",
            "r8",
            "r9",
            "r10",
            "r11",
            "r12",
        ]);
        job.description = "x".repeat(2500);

        let summary = job_summary(&job);
        assert_eq!(summary.requirements.len(), 10);
        assert_eq!(summary.description.chars().count(), 1000);
    }

    #[test]
    fn test_build_match_prompt_embeds_both_summaries() {
        let prompt = build_match_prompt(&data_analyst_profile(), &data_analyst_job()).unwrap();
        assert!(prompt.contains("\"Python\""));
        assert!(prompt.contains("Strong SQL skills"));
        assert!(!prompt.contains("{profile_json}"));
        assert!(!prompt.contains("{job_json}"));
    }
}
