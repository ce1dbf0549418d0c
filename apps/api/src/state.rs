use std::sync::Arc;

use crate::config::Config;
use crate::jobs::jsearch::JSearchClient;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable match scorer. `LlmMatchScorer` when ANTHROPIC_API_KEY is
    /// set, `SkillOverlapScorer` otherwise.
    pub scorer: Arc<dyn MatchScorer>,
    /// JSearch client; `None` disables the jobs endpoints.
    pub jobs: Option<JSearchClient>,
}
