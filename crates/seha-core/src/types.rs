// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation data model and the request/response types passed between
//! the orchestrator and its adapters.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies a user. The login username is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_string())
    }
}

/// Opaque session token handed out at login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([redacted])")
    }
}

/// Per-request context carrying the authenticated user.
///
/// Built by the session registry and handed to every orchestrator call;
/// nothing reads the user from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user: UserId,
}

impl RequestContext {
    pub fn new(user: UserId) -> Self {
        Self { user }
    }
}

/// Parsed `#STATE` payload: string keys to (usually numeric) JSON values.
pub type EmotionState = serde_json::Map<String, serde_json::Value>;

/// Current time as an RFC 3339 timestamp string.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// One user message plus the assistant reply it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(rename = "user")]
    pub user_text: String,
    /// Raw model output, annotation markup included.
    #[serde(rename = "assistant")]
    pub assistant_text: String,
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// A parsed emotional-state annotation and when it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub timestamp: String,
    pub emotions: EmotionState,
}

impl EmotionRecord {
    pub fn new(emotions: EmotionState) -> Self {
        Self {
            timestamp: now_timestamp(),
            emotions,
        }
    }
}

/// Everything stored for one user. Persisted as a single JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(rename = "conversations", default)]
    pub turns: Vec<Turn>,
    #[serde(rename = "research_data", default)]
    pub annotations: Vec<EmotionRecord>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn append_annotation(&mut self, record: EmotionRecord) {
        self.annotations.push(record);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}

/// Role tag of a message sent to the model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a context window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A request to the external model.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    pub model: String,
    /// Context window: system entry first, new user message last.
    pub messages: Vec<ChatMessage>,
    /// Token-count ceiling for the reply.
    pub max_tokens: u32,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A response from the external model.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub id: String,
    /// Concatenated text of the reply.
    pub text: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded(_) => "degraded",
            HealthStatus::Unhealthy(_) => "unhealthy",
        }
    }
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}
