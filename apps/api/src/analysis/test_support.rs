//! Scripted `Generator` for handler and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{Generator, LlmError, Schema};

pub struct FakeGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Schema)>>,
}

impl FakeGenerator {
    /// Always answers with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Always fails as an unauthorized upstream would.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, Schema)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str, schema: &Schema) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((prompt.to_string(), schema.clone()));
        self.reply.clone().ok_or_else(|| LlmError::Api {
            status: 401,
            message: "API key not valid".to_string(),
        })
    }
}
