// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process key-value conversation store.
//!
//! States are kept serialized so that a loaded state is always a copy, the
//! same as with the SQLite store.

use async_trait::async_trait;
use dashmap::DashMap;

use seha_core::{
    AdapterType, ConversationState, ConversationStore, HealthStatus, PluginAdapter, SehaError,
    UserId,
};

/// Key-value store of serialized conversation blobs. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    blobs: DashMap<UserId, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored state.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SehaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SehaError> {
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn initialize(&self) -> Result<(), SehaError> {
        Ok(())
    }

    async fn load(&self, user: &UserId) -> Result<ConversationState, SehaError> {
        // Clone the blob out so no shard lock is held while decoding.
        let blob = self.blobs.get(user).map(|entry| entry.value().clone());
        match blob {
            Some(blob) => ConversationState::from_json(&blob).map_err(SehaError::storage),
            None => Ok(ConversationState::new()),
        }
    }

    async fn save(&self, user: &UserId, state: &ConversationState) -> Result<(), SehaError> {
        let blob = state.to_json().map_err(SehaError::storage)?;
        self.blobs.insert(user.clone(), blob);
        Ok(())
    }

    async fn exists(&self, user: &UserId) -> Result<bool, SehaError> {
        Ok(self.blobs.contains_key(user))
    }
}
