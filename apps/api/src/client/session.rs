//! Three-step client session: upload a resume, paste a job description, read
//! the match.
//!
//! Every operation takes `&mut self`, so a session has at most one call in
//! flight. A failed step never discards what earlier steps produced.

use std::fmt;
use std::mem;

use tracing::{info, warn};

use crate::client::extract::{extract_text, ResumeFile};
use crate::client::{AnalysisApi, ClientError};
use crate::models::{MatchResult, ResumeData};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Step 1: no resume yet.
    #[default]
    Idle,
    /// Step 2: resume parsed, waiting for a job description.
    Parsed {
        resume_text: String,
        resume: ResumeData,
    },
    /// Step 3: match result available.
    Matched {
        resume_text: String,
        resume: ResumeData,
        job_description: String,
        result: MatchResult,
    },
}

impl SessionState {
    pub fn step(&self) -> u8 {
        match self {
            SessionState::Idle => 1,
            SessionState::Parsed { .. } => 2,
            SessionState::Matched { .. } => 3,
        }
    }
}

/// Which user action failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ParseResume,
    MatchJob,
}

/// The last user-visible failure, kept until the next action starts.
#[derive(Debug)]
pub struct SessionError {
    pub action: Action,
    pub source: ClientError,
}

impl SessionError {
    pub fn headline(&self) -> &'static str {
        match self.action {
            Action::ParseResume => {
                "Failed to parse resume. Please try again or use a different file."
            }
            Action::MatchJob => "Failed to analyze match. Please try again.",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.headline(), self.source)
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub struct Session<A> {
    api: A,
    state: SessionState,
    error: Option<SessionError>,
}

impl<A: AnalysisApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: SessionState::Idle,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn step(&self) -> u8 {
        self.state.step()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn resume(&self) -> Option<&ResumeData> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Parsed { resume, .. } | SessionState::Matched { resume, .. } => {
                Some(resume)
            }
        }
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        match &self.state {
            SessionState::Matched { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Step 1 → 2 from a selected file. Starts over from `Idle` first.
    pub async fn load_resume(&mut self, file: ResumeFile) -> Result<(), &SessionError> {
        self.reset();
        info!(file = %file.name, "Loading resume");

        let text = match extract_text(file).await {
            Ok(text) => text,
            Err(e) => return Err(self.fail(Action::ParseResume, e)),
        };
        self.parse(text).await
    }

    /// Step 1 → 2 from pasted text.
    pub async fn load_resume_text(&mut self, text: String) -> Result<(), &SessionError> {
        self.reset();
        if text.trim().is_empty() {
            let e = ClientError::InvalidInput("Resume text is empty".to_string());
            return Err(self.fail(Action::ParseResume, e));
        }
        self.parse(text).await
    }

    async fn parse(&mut self, resume_text: String) -> Result<(), &SessionError> {
        let outcome = self.api.parse_resume(&resume_text).await;
        match outcome {
            Ok(resume) => {
                info!(name = %resume.name, skills = resume.skills.len(), "Resume parsed");
                self.state = SessionState::Parsed {
                    resume_text,
                    resume,
                };
                Ok(())
            }
            Err(e) => Err(self.fail(Action::ParseResume, e)),
        }
    }

    /// Step 2 → 3. From step 3 the previous result is dropped first, as with
    /// `try_another_job`. On failure the session stays on step 2. A blank job
    /// description is rejected without touching the state.
    pub async fn match_job(&mut self, job_description: &str) -> Result<(), &SessionError> {
        self.error = None;
        if job_description.trim().is_empty() {
            let e = ClientError::InvalidInput("Job description is empty".to_string());
            return Err(self.fail(Action::MatchJob, e));
        }
        self.try_another_job();

        let SessionState::Parsed { resume_text, .. } = &self.state else {
            let e = ClientError::InvalidInput("Upload a resume first".to_string());
            return Err(self.fail(Action::MatchJob, e));
        };

        let outcome = self.api.match_job(resume_text, job_description).await;
        match outcome {
            Ok(result) => {
                info!(score = result.score, "Job matched");
                self.state = match mem::take(&mut self.state) {
                    SessionState::Parsed {
                        resume_text,
                        resume,
                    } => SessionState::Matched {
                        resume_text,
                        resume,
                        job_description: job_description.to_string(),
                        result,
                    },
                    other => other,
                };
                Ok(())
            }
            Err(e) => Err(self.fail(Action::MatchJob, e)),
        }
    }

    /// Step 3 → 2: drop the match, keep the resume.
    pub fn try_another_job(&mut self) {
        self.state = match mem::take(&mut self.state) {
            SessionState::Matched {
                resume_text,
                resume,
                ..
            } => SessionState::Parsed {
                resume_text,
                resume,
            },
            other => other,
        };
    }

    /// Any step → 1. Does not cancel a call already sent to the backend.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.error = None;
    }

    fn fail(&mut self, action: Action, source: ClientError) -> &SessionError {
        warn!("{action:?} failed: {source}");
        self.error.insert(SessionError { action, source })
    }
}
