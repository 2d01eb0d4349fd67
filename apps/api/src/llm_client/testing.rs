//! Scripted inference client for deterministic tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{InferenceClient, LlmError};

/// Returns canned responses in order. Once the script runs out the last response
/// is repeated. Every call and prompt is recorded.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

#[derive(Clone)]
enum Scripted {
    Reply(String),
    Fail(u16),
}

impl ScriptedClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| Scripted::Reply(r.into()))
                    .collect(),
            ),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with the same text.
    pub fn repeating(response: &str) -> Self {
        Self::new([response])
    }

    /// Every call fails with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        let client = Self::new(Vec::<String>::new());
        *client.last.lock().unwrap() = Some(Scripted::Fail(status));
        client
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self.script.lock().unwrap().pop_front();
        let step = match next {
            Some(step) => {
                *self.last.lock().unwrap() = Some(step.clone());
                step
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Scripted::Reply(String::new())),
        };

        match step {
            Scripted::Reply(text) => Ok(text),
            Scripted::Fail(status) => Err(LlmError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
