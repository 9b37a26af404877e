// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for Seha.
//!
//! This crate implements [`ModelProvider`] for the Anthropic Messages API:
//! one non-streaming completion per chat request.

pub mod client;
pub mod types;

use async_trait::async_trait;
use secrecy::SecretString;
use seha_config::SehaConfig;
use seha_core::error::SehaError;
use seha_core::traits::{ModelProvider, PluginAdapter};
use seha_core::types::{AdapterType, HealthStatus, ModelRequest, ModelResponse, Role, TokenUsage};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude provider implementing [`ModelProvider`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.anthropic.api_key` if set
    /// 2. `ANTHROPIC_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &SehaConfig) -> Result<Self, SehaError> {
        let api_key = resolve_api_key(&config.anthropic.api_key)?;

        let client = AnthropicClient::new(
            api_key,
            config.anthropic.api_version.clone(),
            config.anthropic.default_model.clone(),
            config.anthropic.base_url.clone(),
        )?;

        info!(
            model = config.anthropic.default_model,
            "Anthropic provider initialized"
        );

        Ok(Self { client })
    }

    /// Creates a provider with an existing client.
    pub fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }
}

/// Converts a [`ModelRequest`] to an Anthropic [`MessageRequest`].
///
/// The Messages API takes the system prompt as a top-level field, so system
/// entries are lifted out of the message list and joined in order.
fn to_message_request(request: &ModelRequest) -> MessageRequest {
    let mut system_parts = Vec::new();
    let mut messages = Vec::with_capacity(request.messages.len());

    for message in &request.messages {
        match message.role {
            Role::System => system_parts.push(message.content.as_str()),
            Role::User | Role::Assistant => messages.push(ApiMessage {
                role: message.role.to_string(),
                content: message.content.clone(),
            }),
        }
    }

    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    MessageRequest {
        model: request.model.clone(),
        messages,
        system,
        max_tokens: request.max_tokens,
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, SehaError> {
        // Health checks send no request, so they never consume tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SehaError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, SehaError> {
        let api_request = to_message_request(&request);
        debug!(
            model = %api_request.model,
            messages = api_request.messages.len(),
            "sending completion request"
        );
        let response = self.client.complete_message(&api_request).await?;
        let text = response
            .text()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| SehaError::Upstream {
                message: "Anthropic API returned no text content".into(),
                source: None,
            })?;

        Ok(ModelResponse {
            text,
            id: response.id,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Resolves the API key from config or environment variable.
fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, SehaError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(SecretString::from(key.clone()));
    }

    std::env::var("ANTHROPIC_API_KEY")
        .map(SecretString::from)
        .map_err(|_| {
            SehaError::Config(
                "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use seha_core::types::ChatMessage;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(messages: Vec<ChatMessage>) -> ModelRequest {
        ModelRequest {
            model: "claude-sonnet-4-20250514".into(),
            messages,
            max_tokens: 1000,
        }
    }

    #[test]
    fn system_entry_is_lifted_out_of_messages() {
        let req = request(vec![
            ChatMessage::system("persona"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("how are you?"),
        ]);
        let api = to_message_request(&req);

        assert_eq!(api.system.as_deref(), Some("persona"));
        assert_eq!(api.messages.len(), 3);
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.messages[1].role, "assistant");
        assert_eq!(api.messages[2].content, "how are you?");
        assert_eq!(api.max_tokens, 1000);
    }

    #[test]
    fn request_without_system_entry_has_no_system_field() {
        let api = to_message_request(&request(vec![ChatMessage::user("hi")]));
        assert!(api.system.is_none());
        assert_eq!(api.messages.len(), 1);
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(&Some("sk-config".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-config");
    }

    #[test]
    #[serial]
    fn resolve_api_key_falls_back_to_env() {
        // SAFETY: serialized with the other env-mutating test.
        unsafe { std::env::set_var("ANTHROPIC_API_KEY", "sk-env") };
        let key = resolve_api_key(&Some(String::new())).unwrap();
        assert_eq!(key.expose_secret(), "sk-env");
        unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };
    }

    #[test]
    #[serial]
    fn resolve_api_key_errors_when_missing() {
        unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };
        let err = resolve_api_key(&None).unwrap_err();
        assert!(matches!(err, SehaError::Config(_)));
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn new_builds_from_config() {
        let mut config = SehaConfig::default();
        config.anthropic.api_key = Some("sk-test".into());
        let provider = AnthropicProvider::new(&config).unwrap();
        assert_eq!(provider.client.default_model(), "claude-sonnet-4-20250514");
        assert_eq!(
            provider.client.base_url(),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[tokio::test]
    async fn complete_returns_reply_text_and_usage() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hello.\n#STATE {\"comfort\": 0.4}"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 7}
        });
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"system": "persona"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new(
            SecretString::from("k"),
            "2023-06-01".into(),
            "claude-sonnet-4-20250514".into(),
            server.uri(),
        )
        .unwrap();
        let provider = AnthropicProvider::with_client(client);

        let response = provider
            .complete(request(vec![
                ChatMessage::system("persona"),
                ChatMessage::user("hi"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.text, "Hello.\n#STATE {\"comfort\": 0.4}");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    async fn complete_with_content(content: serde_json::Value) -> SehaError {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "msg_empty",
            "type": "message",
            "role": "assistant",
            "content": content,
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 0}
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new(
            SecretString::from("k"),
            "2023-06-01".into(),
            "claude-sonnet-4-20250514".into(),
            server.uri(),
        )
        .unwrap();
        let provider = AnthropicProvider::with_client(client);

        provider
            .complete(request(vec![ChatMessage::user("hi")]))
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn complete_without_text_content_is_upstream_error() {
        let err = complete_with_content(serde_json::json!([])).await;
        assert!(matches!(err, SehaError::Upstream { .. }));
        assert_eq!(err.to_string(), "Anthropic API returned no text content");
    }

    #[tokio::test]
    async fn complete_with_empty_text_block_is_upstream_error() {
        let err = complete_with_content(serde_json::json!([{"type": "text", "text": ""}])).await;
        assert!(matches!(err, SehaError::Upstream { .. }));
        assert_eq!(err.to_string(), "Anthropic API returned no text content");
    }

    #[tokio::test]
    async fn health_check_is_healthy() {
        let provider = AnthropicProvider::with_client(
            AnthropicClient::new(
                SecretString::from("k"),
                "2023-06-01".into(),
                "m".into(),
                "http://localhost:1".into(),
            )
            .unwrap(),
        );
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
    }
}
