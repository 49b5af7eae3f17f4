//! Client side of the analysis API: local text extraction, the HTTP calls to
//! the backend and the three-step session that drives them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::handlers::{MatchJobRequest, ParseResumeRequest};
use crate::models::{MatchResult, ResumeData};

pub mod extract;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use extract::{FileKind, ResumeFile};
pub use session::{Action, Session, SessionError, SessionState};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not extract text from '{file}': {reason}")]
    Extraction { file: String, reason: String },

    #[error("{message} (status {status})")]
    Server { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The two backend operations the session depends on.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn parse_resume(&self, text: &str) -> Result<ResumeData, ClientError>;

    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `AnalysisApi` over HTTP against a running backend.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback_message: &str,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| fallback_message.to_string());
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn parse_resume(&self, text: &str) -> Result<ResumeData, ClientError> {
        let body = ParseResumeRequest {
            text: Some(text.to_string()),
        };
        self.post("/api/parse-resume", &body, "Failed to parse resume")
            .await
    }

    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, ClientError> {
        let body = MatchJobRequest {
            resume_text: Some(resume_text.to_string()),
            job_description: Some(job_description.to_string()),
        };
        self.post("/api/match-job", &body, "Failed to match job").await
    }
}
