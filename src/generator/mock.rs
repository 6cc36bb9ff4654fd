use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{CompletionRequest, Generator};
use crate::error::GenerationError;

/// A scripted generator for tests. Returns pre-defined replies in order and
/// remembers every request it was given.
pub struct ScriptedGenerator {
    replies: Vec<Result<String, String>>,
    index: AtomicUsize,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<&str>) -> Self {
        Self::with_results(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    /// Replies where `Err(msg)` surfaces as a service failure.
    pub fn with_results(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self.seen.lock().unwrap().push(request.clone());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(i) {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(msg)) => Err(GenerationError::Transport(msg.clone())),
            None => Err(GenerationError::Transport(format!(
                "ScriptedGenerator: no more replies (called {} times)",
                i + 1
            ))),
        }
    }
}
