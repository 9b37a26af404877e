// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete [`ChatService`] with a mock provider
//! and either an in-memory store or a temp-file SQLite store.

use std::sync::Arc;

use seha_agent::{ChatOptions, ChatOutcome, ChatService};
use seha_config::model::{StorageBackend, StorageConfig};
use seha_core::{ConversationStore, RequestContext, SehaError, SessionToken};
use seha_storage::{MemoryStore, SqliteStore};

use crate::mock_provider::MockProvider;

const TEST_PERSONA: &str = "You are a test assistant. End every reply with #STATE {\"comfort\": 0.0}";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    persona: Option<String>,
    backend: StorageBackend,
    options: ChatOptions,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            persona: None,
            backend: StorageBackend::Memory,
            options: ChatOptions::default(),
        }
    }

    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Set a custom persona.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Back the harness with a SQLite database in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.backend = StorageBackend::Sqlite;
        self
    }

    /// Override model name, token ceiling or marker.
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, SehaError> {
        let mut temp_dir = None;
        let store: Arc<dyn ConversationStore> = match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Sqlite => {
                let dir = tempfile::TempDir::new().map_err(SehaError::storage)?;
                let config = StorageConfig {
                    backend: StorageBackend::Sqlite,
                    database_path: dir.path().join("test.db").to_string_lossy().into_owned(),
                    wal_mode: true,
                };
                let store = SqliteStore::new(config);
                store.initialize().await?;
                temp_dir = Some(dir);
                Arc::new(store)
            }
        };

        let mock_provider = Arc::new(MockProvider::with_responses(self.responses));
        let persona = self.persona.unwrap_or_else(|| TEST_PERSONA.to_string());
        let service = Arc::new(ChatService::new(
            store.clone(),
            mock_provider.clone(),
            persona,
            self.options,
        ));

        Ok(TestHarness {
            service,
            mock_provider,
            store,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and isolated storage.
pub struct TestHarness {
    /// The orchestrator under test.
    pub service: Arc<ChatService>,
    /// The mock model provider.
    pub mock_provider: Arc<MockProvider>,
    /// The conversation store the service writes to.
    pub store: Arc<dyn ConversationStore>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Logs `username` in and returns the session token.
    pub async fn login(&self, username: &str) -> Result<SessionToken, SehaError> {
        self.service
            .login(username)
            .await?
            .ok_or_else(|| SehaError::InvalidRequest("blank username".into()))
    }

    /// Logs `username` in and resolves the resulting request context.
    pub async fn context_for(&self, username: &str) -> Result<RequestContext, SehaError> {
        let token = self.login(username).await?;
        self.service.authenticate(Some(token.as_str()))
    }

    /// Sends a message through the full pipeline as `ctx`.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        text: &str,
    ) -> Result<ChatOutcome, SehaError> {
        self.service.chat(ctx, text).await
    }
}
