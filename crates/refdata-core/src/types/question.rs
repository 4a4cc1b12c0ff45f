//! Trivia question entity

use serde::{Deserialize, Serialize};

/// A trivia prompt belonging to one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, e.g. `wwyd-1`
    pub id: String,
    /// Game tag the prompt belongs to
    pub game: String,
    /// Prompt text shown to players
    pub prompt: String,
    /// Optional discussion hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    /// Question without a hint
    pub fn new(id: impl Into<String>, game: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            game: game.into(),
            prompt: prompt.into(),
            hint: None,
        }
    }

    /// Attach a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
