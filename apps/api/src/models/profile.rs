//! Candidate profile records — the profile side of a match.

use serde::{Deserialize, Serialize};

/// Proficiency level reported for a profile skill.
/// A skill with no explicit level never counts as advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Broad skill classification produced by the resume parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Tool,
    Concept,
}

/// A single skill extracted from a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default)]
    pub level: SkillLevel,
    pub years: Option<f64>,
}

/// One work-history entry. Dates stay as the free-form strings the resume
/// parser produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A parsed candidate profile. Every field is optional on the wire: partial
/// payloads score instead of erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
}
