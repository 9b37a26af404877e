// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Seha research chat backend.
//!
//! This crate provides the conversation data model, the error taxonomy, and
//! the adapter traits implemented by the model provider and the conversation
//! stores. Every other crate in the workspace builds on these.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SehaError;
pub use types::{
    AdapterType, ChatMessage, ConversationState, EmotionRecord, EmotionState, HealthStatus,
    ModelRequest, ModelResponse, RequestContext, Role, SessionToken, TokenUsage, Turn, UserId,
};

pub use traits::{ConversationStore, ModelProvider, PluginAdapter};
