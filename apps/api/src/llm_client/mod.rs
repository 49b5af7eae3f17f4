/// LLM client: the single point of entry for all Gemini API calls.
///
/// No other module talks to the generation API directly. Handlers depend on
/// the `Generator` trait so tests can swap in a fake backend.
///
/// Every call is schema-constrained: the caller supplies the prompt and the
/// response `Schema`, and gets back schema-conformant JSON text.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod schema;

pub use schema::{Schema, SchemaType, SchemaViolation};

const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Generation blocked: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response does not match schema: {0}")]
    Schema(#[from] SchemaViolation),
}

/// A schema-constrained text generator.
///
/// Carried in `AppState` as `Arc<dyn Generator>`.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the raw response text, which the backend promises conforms to `schema`.
    async fn generate(&self, prompt: &str, schema: &Schema) -> Result<String, LlmError>;
}

impl dyn Generator + '_ {
    /// Calls the generator, checks the response against `schema` and
    /// deserializes it into `T`.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &Schema,
    ) -> Result<T, LlmError> {
        let text = self.generate(prompt, schema).await?;
        parse_response(&text, schema)
    }
}

/// Parses raw generator output into `T` through the schema check.
pub fn parse_response<T: DeserializeOwned>(text: &str, schema: &Schema) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    let value: serde_json::Value = serde_json::from_str(text)?;
    let value = schema.conform(value)?;
    Ok(serde_json::from_value(value)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Schema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }

    fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Some(reason);
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .filter(|r| matches!(r.as_str(), "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// The production `Generator`, backed by the Gemini `generateContent` API.
///
/// Uses reqwest's default client: no explicit timeout, no retry.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            api_base: config.gemini_api_base.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// Makes a single call to the API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        schema: &Schema,
    ) -> Result<GenerateContentResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(response)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str, schema: &Schema) -> Result<String, LlmError> {
        let response = self.call(prompt, schema).await?;
        if let Some(reason) = response.block_reason() {
            return Err(LlmError::Blocked(reason));
        }
        response.text().ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
