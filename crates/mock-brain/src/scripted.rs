//! Scripted brain implementation - canned replies with call recording.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};

/// A brain that answers from a script and records every request.
///
/// Queued replies are consumed first, in order. Once the queue is empty the
/// per-task reply is used; a task without one fails.
#[derive(Debug)]
pub struct ScriptedBrain {
    name: String,
    classification: Option<String>,
    summary: Option<String>,
    queue: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBrain {
    /// Create a brain with no replies configured.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classification: None,
            summary: None,
            queue: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply used for every classification request.
    pub fn on_classification(mut self, reply: impl Into<String>) -> Self {
        self.classification = Some(reply.into());
        self
    }

    /// Reply used for every summary request.
    pub fn on_summary(mut self, reply: impl Into<String>) -> Self {
        self.summary = Some(reply.into());
        self
    }

    /// Queue a one-shot reply. `Err` messages become `ProcessingFailed`.
    pub fn then(self, reply: Result<&str, &str>) -> Self {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(reply.map(str::to_string).map_err(str::to_string));
        }
        self
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls for a given task.
    pub fn calls_for(&self, task: CompletionTask) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.task == task)
            .count()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let queued = self.queue.lock().ok().and_then(|mut queue| queue.pop_front());
        if let Some(reply) = queued {
            return reply.map_err(BrainError::ProcessingFailed);
        }

        let reply = match request.task {
            CompletionTask::Classification => self.classification.clone(),
            CompletionTask::Summary => self.summary.clone(),
        };

        reply.ok_or_else(|| {
            BrainError::ProcessingFailed(format!("{} has no reply for {:?}", self.name, request.task))
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
