// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model provider for deterministic testing.
//!
//! `MockProvider` implements `ModelProvider` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use seha_core::traits::{ModelProvider, PluginAdapter};
use seha_core::types::{AdapterType, HealthStatus, ModelRequest, ModelResponse, TokenUsage};
use seha_core::SehaError;

/// A mock model provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue; an `Err` entry surfaces as
/// [`SehaError::Upstream`]. When the queue is empty, a default
/// "mock response" text is returned. Every request is recorded.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(Ok(text.into()));
    }

    /// Queue an upstream failure carrying `message`.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().await.push_back(Err(message.into()));
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_response(&self) -> Result<String, String> {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, SehaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SehaError> {
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, SehaError> {
        let model = request.model.clone();
        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as u32 / 4)
            .sum();
        self.requests.lock().await.push(request);

        let text = self.next_response().await.map_err(|message| SehaError::Upstream {
            message,
            source: None,
        })?;
        let output_tokens = text.len() as u32 / 4;

        Ok(ModelResponse {
            id: "mock-msg".to_string(),
            text,
            model,
            stop_reason: Some("end_turn".to_string()),
            usage: TokenUsage {
                input_tokens,
                output_tokens,
            },
        })
    }
}
