// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation stores for Seha.
//!
//! Both stores keep one serialized [`ConversationState`] blob per user and
//! implement whole-object read/overwrite semantics:
//!
//! - [`SqliteStore`]: WAL-mode SQLite with embedded migrations; every call goes
//!   through tokio-rusqlite's single background thread.
//! - [`MemoryStore`]: a process-local key-value map.
//!
//! [`ConversationState`]: seha_core::ConversationState

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;

use std::sync::Arc;

use seha_config::model::{StorageBackend, StorageConfig};
use seha_core::{ConversationStore, SehaError};

pub use adapter::SqliteStore;
pub use database::Database;
pub use memory::MemoryStore;

/// Creates and initializes the store selected by `config.backend`.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn ConversationStore>, SehaError> {
    let store: Arc<dyn ConversationStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::new(config.clone())),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    store.initialize().await?;
    Ok(store)
}
