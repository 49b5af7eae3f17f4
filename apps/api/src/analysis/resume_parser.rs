//! Resume parser: turns free-form resume text into `ResumeData` with a single
//! schema-constrained generation call.

use tracing::info;

use crate::analysis::prompts::resume_parse_prompt;
use crate::errors::AppError;
use crate::llm_client::{Generator, LlmError};
use crate::models::ResumeData;

pub const MISSING_TEXT: &str = "No text provided";

/// Parses resume text into structured fields.
///
/// Blank input is rejected before any generation call is made.
pub async fn parse_resume(
    resume_text: &str,
    generator: &dyn Generator,
) -> Result<ResumeData, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::InvalidInput(MISSING_TEXT.to_string()));
    }

    let prompt = resume_parse_prompt(resume_text);
    let resume: ResumeData = generator
        .generate_json(&prompt, &ResumeData::schema())
        .await
        .map_err(AppError::upstream("Error parsing resume"))?;

    resume
        .validate()
        .map_err(|e| AppError::upstream("Error parsing resume")(LlmError::Schema(e)))?;

    info!(
        skills = resume.skills.len(),
        experience = resume.experience.len(),
        "Resume parsed"
    );
    Ok(resume)
}
