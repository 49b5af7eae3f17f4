//! Scripted `AnalysisApi` and fixtures for session and view tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{AnalysisApi, ClientError};
use crate::models::{MatchResult, ResumeData};

/// Replays queued replies in order and records what it was asked.
#[derive(Default)]
pub struct ScriptedApi {
    parse_replies: Mutex<VecDeque<Result<ResumeData, ClientError>>>,
    match_replies: Mutex<VecDeque<Result<MatchResult, ClientError>>>,
    parsed: Mutex<Vec<String>>,
    matched: Mutex<Vec<(String, String)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_parse(&self, reply: Result<ResumeData, ClientError>) {
        self.parse_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_match(&self, reply: Result<MatchResult, ClientError>) {
        self.match_replies.lock().unwrap().push_back(reply);
    }

    pub fn parsed_texts(&self) -> Vec<String> {
        self.parsed.lock().unwrap().clone()
    }

    pub fn matched_pairs(&self) -> Vec<(String, String)> {
        self.matched.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn parse_resume(&self, text: &str) -> Result<ResumeData, ClientError> {
        self.parsed.lock().unwrap().push(text.to_string());
        self.parse_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no parse reply queued")
    }

    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, ClientError> {
        self.matched
            .lock()
            .unwrap()
            .push((resume_text.to_string(), job_description.to_string()));
        self.match_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no match reply queued")
    }
}

pub fn john_doe() -> ResumeData {
    ResumeData {
        name: "John Doe".to_string(),
        skills: vec!["Python".to_string(), "AWS".to_string()],
        ..Default::default()
    }
}

pub fn match_72() -> MatchResult {
    MatchResult {
        score: 72.0,
        matching_skills: vec!["Python".to_string()],
        missing_skills: vec!["Go".to_string()],
        improvement_suggestions: "- add Go".to_string(),
        ..Default::default()
    }
}

pub fn server_error() -> ClientError {
    ClientError::Server {
        status: 500,
        message: "API key not valid".to_string(),
    }
}
