//! Assistant response models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer to a single free-text request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Human-readable sentence
    pub answer: String,
    /// Wire name of the recognized intent
    pub intent: String,
    /// Structured payload; shape depends on the intent
    pub data: Value,
}

impl AskResponse {
    pub fn new(answer: impl Into<String>, intent: &str, data: Value) -> Self {
        Self {
            answer: answer.into(),
            intent: intent.to_string(),
            data,
        }
    }
}
