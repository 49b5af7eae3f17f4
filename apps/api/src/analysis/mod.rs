// Resume analysis: structured extraction and job matching.
// All generation calls go through llm_client; no direct Gemini calls here.

pub mod handlers;
pub mod job_matcher;
pub mod prompts;
pub mod resume_parser;

#[cfg(test)]
pub(crate) mod test_support;
