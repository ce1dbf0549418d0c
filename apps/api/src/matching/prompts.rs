// LLM prompt constants for the Matching module.

/// System prompt for match analysis — enforces JSON-only output.
pub const MATCH_ANALYSIS_SYSTEM: &str =
    "You are a professional recruiter analyzing candidate-job fit. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Match analysis prompt template. Replace `{profile_json}` and `{job_json}`
/// before sending.
pub const MATCH_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze how well this candidate matches this job.

CANDIDATE PROFILE:
{profile_json}

JOB POSTING:
{job_json}

Consider:
1. Skill alignment (technical and soft skills)
2. Experience level and relevance
3. Career trajectory fit
4. Location/remote match
5. Missing critical qualifications

Provide your response as JSON:
{
  "score": <number 0-100>,
  "analysis": "<2-3 sentence summary of fit>",
  "strengths": ["strength1", "strength2", "strength3"],
  "concerns": ["concern1", "concern2"]
}

Return ONLY the JSON, no other text."#;
