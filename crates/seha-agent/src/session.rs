// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-side session registry mapping opaque tokens to users.

use dashmap::DashMap;
use seha_core::{RequestContext, SehaError, SessionToken, UserId};
use tracing::debug;

/// Concurrent map of active session tokens, shared by all request handlers.
///
/// Sessions live until logout or process exit; nothing is persisted.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, UserId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token bound to `user`.
    pub fn create(&self, user: UserId) -> SessionToken {
        let token = uuid::Uuid::new_v4().to_string();
        debug!(user = %user, "session created");
        self.sessions.insert(token.clone(), user);
        SessionToken(token)
    }

    /// Resolves a token to a request context.
    pub fn resolve(&self, token: Option<&str>) -> Result<RequestContext, SehaError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(SehaError::Unauthenticated)?;
        self.sessions
            .get(token)
            .map(|entry| RequestContext::new(entry.value().clone()))
            .ok_or(SehaError::Unauthenticated)
    }

    /// Forgets a token. Returns the user it was bound to, if any.
    pub fn remove(&self, token: &str) -> Option<UserId> {
        self.sessions.remove(token).map(|(_, user)| user)
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
