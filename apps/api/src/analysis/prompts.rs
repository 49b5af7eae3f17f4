// All LLM prompt constants for the analysis module.
// The output shape is carried by the response schema, so prompts describe
// the task only.

/// Resume extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = "\
Extract structured information from the following resume text. Return a JSON object.

List experience entries from most recent to oldest. Use empty strings for \
contact details that do not appear in the text. Do NOT invent skills, \
employers or dates that are not stated.

Resume Text:
{resume_text}";

/// Job match prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = "\
Compare the following resume against the job description.
Provide a detailed analysis including a match score (0-100), matching skills, \
missing skills, strengths, weaknesses, and specific suggestions to improve the \
resume for this role.

Write the improvement suggestions as a Markdown bullet list.

Resume:
{resume_text}

Job Description:
{job_description}";

pub fn resume_parse_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn job_match_prompt(resume_text: &str, job_description: &str) -> String {
    // Substitute the job description first so a resume that happens to contain
    // the literal `{job_description}` is left untouched.
    JOB_MATCH_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}
