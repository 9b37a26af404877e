// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Seha.

use thiserror::Error;

/// The error type shared by the orchestrator, the adapters and the gateway.
///
/// A missing or malformed `#STATE` annotation is deliberately absent from
/// this enum: it is a normal outcome, not a failure.
#[derive(Debug, Error)]
pub enum SehaError {
    /// Configuration errors (missing API key, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The external model call failed. `message` is surfaced to the client verbatim.
    #[error("{message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No active session for the request.
    #[error("not logged in")]
    Unauthenticated,

    /// The request was well-formed JSON but semantically unusable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SehaError {
    /// Wraps any storage-layer error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SehaError::Storage {
            source: Box::new(err),
        }
    }
}
