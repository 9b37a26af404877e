// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for model requests.
//!
//! [`ContextWindowBuilder`] turns the persona and a user's stored turns into
//! the role-tagged message list sent to the model: the persona as the system
//! entry, the last [`WINDOW_TURNS`] turns as user/assistant pairs, and the new
//! message last. [`load_persona`] resolves the persona text at startup.

pub mod persona;

use seha_core::{ChatMessage, Turn};
use tracing::debug;

pub use persona::{load_persona, DEFAULT_PERSONA};

/// Number of most recent turns included in every context window.
pub const WINDOW_TURNS: usize = 10;

/// Builds bounded context windows around a fixed persona.
#[derive(Debug, Clone)]
pub struct ContextWindowBuilder {
    persona: String,
}

impl ContextWindowBuilder {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    /// Assembles the message list for `message` given the stored `history`.
    ///
    /// Output length is `2 + 2 * min(history.len(), WINDOW_TURNS)`. Message
    /// text is never truncated.
    pub fn build(&self, history: &[Turn], message: &str) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(WINDOW_TURNS);
        let window = &history[start..];

        let mut messages = Vec::with_capacity(2 + window.len() * 2);
        messages.push(ChatMessage::system(self.persona.as_str()));
        for turn in window {
            messages.push(ChatMessage::user(turn.user_text.as_str()));
            messages.push(ChatMessage::assistant(turn.assistant_text.as_str()));
        }
        messages.push(ChatMessage::user(message));

        debug!(
            stored_turns = history.len(),
            window_turns = window.len(),
            "context window assembled"
        );
        messages
    }
}
