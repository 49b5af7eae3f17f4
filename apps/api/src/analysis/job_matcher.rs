//! Job matcher: compares resume text against a job description and returns
//! a `MatchResult`.

use tracing::{info, warn};

use crate::analysis::prompts::job_match_prompt;
use crate::errors::AppError;
use crate::llm_client::Generator;
use crate::models::MatchResult;

pub const MISSING_FIELDS: &str = "Resume text and job description are required";

/// Scores `resume_text` against `job_description`.
///
/// Either input blank is rejected before any generation call is made.
pub async fn match_job(
    resume_text: &str,
    job_description: &str,
    generator: &dyn Generator,
) -> Result<MatchResult, AppError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Err(AppError::InvalidInput(MISSING_FIELDS.to_string()));
    }

    let prompt = job_match_prompt(resume_text, job_description);
    let mut result: MatchResult = generator
        .generate_json(&prompt, &MatchResult::schema())
        .await
        .map_err(AppError::upstream("Error matching job"))?;

    clamp_score(&mut result);

    info!(
        score = result.score,
        matching = result.matching_skills.len(),
        missing = result.missing_skills.len(),
        "Job matched"
    );
    Ok(result)
}

/// Keeps the score inside 0 – 100. The model is only asked to stay in range.
fn clamp_score(result: &mut MatchResult) {
    if !(0.0..=100.0).contains(&result.score) {
        warn!("Model returned out-of-range score {}, clamping", result.score);
        result.score = result.score.clamp(0.0, 100.0);
    }
}
