//! Scripted `CompletionProvider` for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Barrier;

use crate::llm_client::{Completion, CompletionProvider, CompletionRequest, LlmError};

enum Scripted {
    Reply(Completion),
    Fail,
}

/// Replays queued replies in order. When the queue is empty the `repeat`
/// reply is used; with no `repeat` the call fails like an unreachable provider.
#[derive(Default)]
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Scripted>>,
    repeat: Mutex<Option<Completion>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    gate: Mutex<Option<Arc<Barrier>>>,
}

pub fn tool_reply(value: Value) -> Completion {
    Completion {
        content: None,
        tool_arguments: Some(value.to_string()),
    }
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, completion: Completion) {
        self.queue.lock().unwrap().push_back(Scripted::Reply(completion));
    }

    pub fn reply_with_tool(&self, value: Value) {
        self.reply(tool_reply(value));
    }

    pub fn reply_with_raw_tool(&self, arguments: &str) {
        self.reply(Completion {
            content: None,
            tool_arguments: Some(arguments.to_string()),
        });
    }

    pub fn reply_with_text(&self, text: &str) {
        self.reply(Completion {
            content: Some(text.to_string()),
            tool_arguments: None,
        });
    }

    pub fn fail(&self) {
        self.queue.lock().unwrap().push_back(Scripted::Fail);
    }

    pub fn always_reply_with_tool(&self, value: Value) {
        *self.repeat.lock().unwrap() = Some(tool_reply(value));
    }

    /// Holds every call until `callers` calls are in flight at once.
    pub fn rendezvous(&self, callers: usize) {
        *self.gate.lock().unwrap() = Some(Arc::new(Barrier::new(callers)));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }

        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(completion)) => Ok(completion),
            Some(Scripted::Fail) => Err(LlmError::Api {
                status: 503,
                message: "scripted outage".to_string(),
            }),
            None => match self.repeat.lock().unwrap().clone() {
                Some(completion) => Ok(completion),
                None => Err(LlmError::RateLimited { retries: 0 }),
            },
        }
    }
}
