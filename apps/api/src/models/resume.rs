use serde::{Deserialize, Serialize};

use crate::llm_client::{Schema, SchemaViolation};

/// Structured extraction of one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub year: String,
}

impl ResumeData {
    /// Output schema sent with every resume extraction call.
    pub fn schema() -> Schema {
        let experience = Schema::object(vec![
            ("company", Schema::string()),
            ("role", Schema::string()),
            ("duration", Schema::string()),
            ("description", Schema::string()),
        ])
        .required(&["company", "role"]);

        let education = Schema::object(vec![
            ("institution", Schema::string()),
            ("degree", Schema::string()),
            ("year", Schema::string()),
        ])
        .required(&["institution", "degree"]);

        Schema::object(vec![
            ("name", Schema::string()),
            ("email", Schema::string()),
            ("phone", Schema::string()),
            ("skills", Schema::string_array()),
            ("experience", Schema::array(experience)),
            ("education", Schema::array(education)),
            ("summary", Schema::string()),
        ])
        .required(&["name", "skills", "experience"])
    }

    /// Checks what the schema cannot express: a usable candidate name.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.name.trim().is_empty() {
            return Err(SchemaViolation::BlankField("$.name".to_string()));
        }
        Ok(())
    }

    /// Most recent role, as listed first by the model.
    pub fn latest_experience(&self) -> Option<&Experience> {
        self.experience.first()
    }
}
