// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chat pipeline and the session-facing operations around it.

use std::sync::Arc;

use seha_annotation::AnnotationParser;
use seha_config::SehaConfig;
use seha_context::ContextWindowBuilder;
use seha_core::{
    ConversationStore, EmotionRecord, EmotionState, ModelProvider, ModelRequest, RequestContext,
    SehaError, SessionToken, Turn, UserId,
};
use tracing::{debug, info, warn};

use crate::session::SessionRegistry;

/// Model parameters and annotation marker for the pipeline.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub max_tokens: u32,
    pub marker: String,
}

impl ChatOptions {
    pub fn from_config(config: &SehaConfig) -> Self {
        Self {
            model: config.anthropic.default_model.clone(),
            max_tokens: config.anthropic.max_tokens,
            marker: config.annotation.marker.clone(),
        }
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self::from_config(&SehaConfig::default())
    }
}

/// Result of one successful chat exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    /// Raw reply text, annotation markup included.
    pub response: String,
    /// Parsed annotation, if the reply carried a usable one.
    pub emotion_state: Option<EmotionState>,
}

/// Orchestrates login, chat and research-data access.
pub struct ChatService {
    sessions: SessionRegistry,
    store: Arc<dyn ConversationStore>,
    provider: Arc<dyn ModelProvider>,
    window: ContextWindowBuilder,
    parser: AnnotationParser,
    model: String,
    max_tokens: u32,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        provider: Arc<dyn ModelProvider>,
        persona: impl Into<String>,
        options: ChatOptions,
    ) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            store,
            provider,
            window: ContextWindowBuilder::new(persona),
            parser: AnnotationParser::new(options.marker),
            model: options.model,
            max_tokens: options.max_tokens,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }

    /// Starts a session for `username`.
    ///
    /// Returns `None` for a blank username. A user seen for the first time
    /// gets an empty conversation state persisted before the token is issued.
    pub async fn login(&self, username: &str) -> Result<Option<SessionToken>, SehaError> {
        if username.trim().is_empty() {
            debug!("login rejected: blank username");
            return Ok(None);
        }

        let user = UserId::from(username);
        if !self.store.exists(&user).await? {
            self.store.save(&user, &Default::default()).await?;
            info!(user = %user, "created conversation state for new user");
        }

        let token = self.sessions.create(user.clone());
        info!(user = %user, "user logged in");
        Ok(Some(token))
    }

    /// Resolves a session token into a request context.
    pub fn authenticate(&self, token: Option<&str>) -> Result<RequestContext, SehaError> {
        self.sessions.resolve(token)
    }

    /// Forgets a session token. Stored state is untouched.
    pub fn logout(&self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(user) => {
                info!(user = %user, "user logged out");
                true
            }
            None => false,
        }
    }

    /// Runs one chat exchange for the context user.
    ///
    /// Stored state is only written after the model call succeeds with a
    /// non-blank reply, so any failure leaves it exactly as it was. An empty
    /// `#STATE {}` annotation is echoed back but not recorded.
    pub async fn chat(
        &self,
        ctx: &RequestContext,
        message: &str,
    ) -> Result<ChatOutcome, SehaError> {
        let mut state = self.store.load(&ctx.user).await?;
        let messages = self.window.build(&state.turns, message);

        let request = ModelRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
        };

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(user = %ctx.user, error = %e, "model call failed");
                return Err(e);
            }
        };
        debug!(
            user = %ctx.user,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "model reply received"
        );

        let reply = response.text;
        if reply.trim().is_empty() {
            warn!(user = %ctx.user, "model returned an empty reply");
            return Err(SehaError::Upstream {
                message: "model returned an empty reply".into(),
                source: None,
            });
        }
        let emotion_state = self.parser.parse(&reply);

        state.append_turn(Turn::new(message, reply.as_str()));
        if let Some(emotions) = emotion_state.as_ref().filter(|e| !e.is_empty()) {
            state.append_annotation(EmotionRecord::new(emotions.clone()));
        }
        self.store.save(&ctx.user, &state).await?;

        Ok(ChatOutcome {
            response: reply,
            emotion_state,
        })
    }

    /// Stored annotation history for the context user, oldest first.
    pub async fn research_data(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<EmotionRecord>, SehaError> {
        let state = self.store.load(&ctx.user).await?;
        Ok(state.annotations)
    }
}
