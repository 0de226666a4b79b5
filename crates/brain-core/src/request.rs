//! Completion request types.

use serde::{Deserialize, Serialize};

/// What a completion is used for.
///
/// Providers may pick a different model or sampling temperature per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTask {
    /// Intent classification: deterministic, JSON-only output.
    Classification,
    /// Free-form prose summary.
    Summary,
}

impl CompletionTask {
    /// Sampling temperature used for this task.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Classification => 0.0,
            Self::Summary => 0.2,
        }
    }

    /// Whether the provider should be asked for a JSON object.
    pub fn wants_json(&self) -> bool {
        matches!(self, Self::Classification)
    }
}

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// What the completion is for.
    pub task: CompletionTask,
    /// Optional system instruction.
    pub system: Option<String>,
    /// The user-facing prompt text.
    pub prompt: String,
}

impl CompletionRequest {
    /// Create a classification request.
    pub fn classification(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            task: CompletionTask::Classification,
            system: Some(system.into()),
            prompt: prompt.into(),
        }
    }

    /// Create a summary request.
    pub fn summary(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            task: CompletionTask::Summary,
            system: Some(system.into()),
            prompt: prompt.into(),
        }
    }

    /// System instruction and prompt joined into a single text block.
    ///
    /// For providers without a separate system role.
    pub fn combined_text(&self) -> String {
        match &self.system {
            Some(system) if !system.is_empty() => format!("{}\n\n{}", system, self.prompt),
            _ => self.prompt.clone(),
        }
    }
}
