// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ConversationStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use seha_config::model::StorageConfig;
use seha_core::types::now_timestamp;
use seha_core::{
    AdapterType, ConversationState, ConversationStore, HealthStatus, PluginAdapter, SehaError,
    UserId,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed conversation store.
///
/// The database is opened lazily by [`ConversationStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the configured database path. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, SehaError> {
        self.db.get().ok_or_else(|| SehaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SehaError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".to_string()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("SELECT 1", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SehaError> {
        if let Some(db) = self.db.get()
            && self.config.wal_mode
        {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE);", [], |_| Ok(()))
                })
                .await
                .map_err(map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn initialize(&self) -> Result<(), SehaError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SehaError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn load(&self, user: &UserId) -> Result<ConversationState, SehaError> {
        match queries::conversations::get_state(self.db()?, user.as_str()).await? {
            Some(blob) => ConversationState::from_json(&blob).map_err(SehaError::storage),
            None => Ok(ConversationState::new()),
        }
    }

    async fn save(&self, user: &UserId, state: &ConversationState) -> Result<(), SehaError> {
        let blob = state.to_json().map_err(SehaError::storage)?;
        queries::conversations::put_state(self.db()?, user.as_str(), blob, now_timestamp()).await?;
        debug!(
            user = %user,
            turns = state.turns.len(),
            annotations = state.annotations.len(),
            "conversation state saved"
        );
        Ok(())
    }

    async fn exists(&self, user: &UserId) -> Result<bool, SehaError> {
        queries::conversations::has_state(self.db()?, user.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seha_core::{EmotionRecord, EmotionState, Turn};
    use serde_json::json;

    async fn store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("seha.db").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        let store = SqliteStore::new(config);
        store.initialize().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn missing_user_loads_empty_state() {
        let (_dir, store) = store().await;
        let user = UserId::from("nobody");
        assert_eq!(store.load(&user).await.unwrap(), ConversationState::new());
        assert!(!store.exists(&user).await.unwrap());
    }

    #[tokio::test]
    async fn save_then_load_keeps_every_turn() {
        let (_dir, store) = store().await;
        let user = UserId::from("alice");

        let mut state = store.load(&user).await.unwrap();
        for i in 0..4 {
            state.append_turn(Turn::new(format!("q{i}"), format!("a{i}")));
            store.save(&user, &state).await.unwrap();
        }

        let loaded = store.load(&user).await.unwrap();
        assert_eq!(loaded.turns.len(), 4);
        assert!(store.exists(&user).await.unwrap());
    }

    #[tokio::test]
    async fn turn_and_annotation_round_trip() {
        let (_dir, store) = store().await;
        let user = UserId::from("bob");

        let mut emotions = EmotionState::new();
        emotions.insert("comfort".into(), json!(0.25));
        emotions.insert("trust".into(), json!(0.8));

        let mut state = ConversationState::new();
        state.append_turn(Turn::new(
            "how are you",
            "fine\n#STATE {\"comfort\": 0.25, \"trust\": 0.8}",
        ));
        state.append_annotation(EmotionRecord::new(emotions.clone()));
        store.save(&user, &state).await.unwrap();

        let loaded = store.load(&user).await.unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.annotations[0].emotions, emotions);
    }

    #[tokio::test]
    async fn save_overwrites_whole_blob() {
        let (_dir, store) = store().await;
        let user = UserId::from("carol");

        let mut state = ConversationState::new();
        state.append_turn(Turn::new("one", "1"));
        state.append_turn(Turn::new("two", "2"));
        store.save(&user, &state).await.unwrap();

        store.save(&user, &ConversationState::new()).await.unwrap();
        assert!(store.load(&user).await.unwrap().turns.is_empty());
    }

    #[tokio::test]
    async fn interleaved_cycles_lose_an_update() {
        let (_dir, store) = store().await;
        let user = UserId::from("dave");

        let mut first = store.load(&user).await.unwrap();
        let mut second = store.load(&user).await.unwrap();
        first.append_turn(Turn::new("first", "r1"));
        second.append_turn(Turn::new("second", "r2"));
        store.save(&user, &first).await.unwrap();
        store.save(&user, &second).await.unwrap();

        let loaded = store.load(&user).await.unwrap();
        assert_eq!(loaded.turns.len(), 1);
        assert_eq!(loaded.turns[0].user_text, "second");
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let (_dir, store) = store().await;
        let mut state = ConversationState::new();
        state.append_turn(Turn::new("hi", "hello"));
        store.save(&UserId::from("zoe"), &state).await.unwrap();
        store.save(&UserId::from("amy"), &ConversationState::new()).await.unwrap();

        assert!(store.load(&UserId::from("amy")).await.unwrap().turns.is_empty());
        assert_eq!(store.load(&UserId::from("zoe")).await.unwrap().turns.len(), 1);
    }

    #[tokio::test]
    async fn uninitialized_store_errors_and_reports_unhealthy() {
        let store = SqliteStore::new(StorageConfig::default());
        assert!(store.load(&UserId::from("x")).await.is_err());
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn initialized_store_is_healthy_and_shuts_down() {
        let (_dir, store) = store().await;
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.shutdown().await.unwrap();
    }
}
