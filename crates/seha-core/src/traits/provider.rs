// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model provider trait for the external language-model API.

use async_trait::async_trait;

use crate::error::SehaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ModelRequest, ModelResponse};

/// Adapter for the external model.
///
/// One call per chat request, single response, no streaming. Implementations
/// must not retry: a failure is returned as [`SehaError::Upstream`].
#[async_trait]
pub trait ModelProvider: PluginAdapter {
    /// Sends the assembled context window and returns the full reply.
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, SehaError>;
}
