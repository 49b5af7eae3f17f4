use serde::{Deserialize, Serialize};

use crate::llm_client::Schema;

/// Structured comparison of one resume against one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0 – 100, as produced by the model.
    pub score: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Markdown.
    pub improvement_suggestions: String,
    #[serde(default)]
    pub overall_feedback: String,
}

/// Coarse reading of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Strong,
    Moderate,
    Weak,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Strong => "Strong match",
            Verdict::Moderate => "Moderate match",
            Verdict::Weak => "Weak match",
        }
    }
}

impl MatchResult {
    /// Output schema sent with every job match call.
    pub fn schema() -> Schema {
        Schema::object(vec![
            ("score", Schema::number().describe("Match score from 0 to 100")),
            ("matchingSkills", Schema::string_array()),
            ("missingSkills", Schema::string_array()),
            ("strengths", Schema::string_array()),
            ("weaknesses", Schema::string_array()),
            (
                "improvementSuggestions",
                Schema::string().describe("Markdown formatted suggestions"),
            ),
            ("overallFeedback", Schema::string()),
        ])
        .required(&[
            "score",
            "matchingSkills",
            "missingSkills",
            "improvementSuggestions",
        ])
    }

    /// Score rounded for display.
    pub fn percent(&self) -> u32 {
        self.score.round().clamp(0.0, 100.0) as u32
    }

    /// Verdict for the rounded percentage, not the raw score.
    pub fn verdict(&self) -> Verdict {
        match self.percent() {
            80.. => Verdict::Strong,
            60..=79 => Verdict::Moderate,
            _ => Verdict::Weak,
        }
    }
}
