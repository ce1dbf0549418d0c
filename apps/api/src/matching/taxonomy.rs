#![allow(dead_code)]

//! Skill taxonomy — canonical skill names and synonym expansion.
//!
//! The table is static and read-only. Every canonical key is a member of its
//! own synonym set, and synonym sets are assumed disjoint; the lookup does not
//! enforce disjointness, it just takes the first matching entry.

use std::collections::HashSet;

/// Canonical skill → synonyms, all lowercase. Entry order is the tie-break:
/// a mention listed under two entries resolves to the earlier one.
const SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    // Programming languages
    ("python", &["python3", "py", "python programming"]),
    ("javascript", &["js", "ecmascript", "node.js", "nodejs"]),
    (
        "sql",
        &[
            "structured query language",
            "t-sql",
            "pl/sql",
            "mysql",
            "postgresql",
            "postgres",
        ],
    ),
    // Data tools
    ("tableau", &["tableau desktop", "tableau server"]),
    ("power bi", &["powerbi", "microsoft power bi", "power-bi"]),
    ("excel", &["microsoft excel", "ms excel", "spreadsheets"]),
    ("snowflake", &["snowflake data warehouse"]),
    ("dbt", &["data build tool", "dbt-core"]),
    // Cloud platforms
    ("aws", &["amazon web services", "amazon aws"]),
    ("azure", &["microsoft azure", "azure cloud"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    // Concepts
    ("data engineering", &["data engineer", "data pipeline", "etl"]),
    ("data science", &["data scientist", "machine learning", "ml"]),
    ("business intelligence", &["bi", "business analytics"]),
    (
        "cybersecurity",
        &["cyber security", "information security", "infosec"],
    ),
    // Healthcare
    ("epic", &["epic systems", "epic emr", "epic ehr"]),
    ("cpt", &["cpt codes", "current procedural terminology"]),
    (
        "icd",
        &["icd-10", "icd codes", "international classification of diseases"],
    ),
];

/// Lowercases and trims a skill mention. No stemming, no punctuation
/// stripping.
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// All strings considered equivalent to `skill`, including itself.
/// Unknown skills are their own only synonym.
pub fn synonyms(skill: &str) -> HashSet<String> {
    let normalized = normalize(skill);

    for (canonical, syns) in SKILL_SYNONYMS {
        if *canonical == normalized || syns.contains(&normalized.as_str()) {
            let mut set: HashSet<String> = syns.iter().map(|s| (*s).to_string()).collect();
            set.insert((*canonical).to_string());
            return set;
        }
    }

    HashSet::from([normalized])
}

/// True iff two mentions refer to the same underlying skill.
pub fn skills_equivalent(a: &str, b: &str) -> bool {
    !synonyms(a).is_disjoint(&synonyms(b))
}

/// Profile skills that appear in at least one job requirement, in profile
/// order, each at most once and with its original spelling.
///
/// A hit is substring containment of any synonym inside the normalized
/// requirement text, short-circuiting on the first requirement that matches.
/// Deliberately substring, not token, matching: "aws" also matches inside a
/// longer word. Stored scores depend on this behavior.
pub fn matched_skills(profile_skills: &[String], job_requirements: &[String]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();

    for skill in profile_skills {
        let syns = synonyms(skill);
        let hit = job_requirements.iter().any(|req| {
            let req_normalized = normalize(req);
            syns.iter().any(|syn| req_normalized.contains(syn.as_str()))
        });
        if hit && !matched.contains(skill) {
            matched.push(skill.clone());
        }
    }

    matched
}
