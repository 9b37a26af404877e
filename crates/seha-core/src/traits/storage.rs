// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store trait for persistence backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::error::SehaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConversationState, UserId};

/// Per-user conversation persistence with whole-blob semantics.
///
/// There are no partial updates, transactions, or concurrency tokens: callers
/// load the full state, modify it in memory, and save it back. Two interleaved
/// load/modify/save cycles for the same user lose the earlier write.
#[async_trait]
pub trait ConversationStore: PluginAdapter {
    /// Prepares the backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), SehaError>;

    /// Loads the state for `user`, or a fresh empty state if none is stored.
    async fn load(&self, user: &UserId) -> Result<ConversationState, SehaError>;

    /// Overwrites the entire stored state for `user`.
    async fn save(&self, user: &UserId, state: &ConversationState) -> Result<(), SehaError>;

    /// Returns true if a state has ever been saved for `user`.
    async fn exists(&self, user: &UserId) -> Result<bool, SehaError>;
}
