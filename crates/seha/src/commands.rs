// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands: `seha config` and `seha research-data`.

use seha_config::SehaConfig;
use seha_core::{ConversationStore, SehaError, UserId};

/// Renders the configuration as TOML with the API key redacted.
pub fn render_config(config: &SehaConfig) -> Result<String, SehaError> {
    toml::to_string_pretty(&config.redacted())
        .map_err(|e| SehaError::Internal(format!("failed to render config: {e}")))
}

pub fn print_config(config: &SehaConfig) -> Result<(), SehaError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Loads `user`'s stored emotion records and renders them as pretty JSON.
pub async fn research_data_json(config: &SehaConfig, user: &str) -> Result<String, SehaError> {
    let store = seha_storage::open_store(&config.storage).await?;
    let state = store.load(&UserId::from(user)).await?;
    serde_json::to_string_pretty(&state.annotations)
        .map_err(|e| SehaError::Internal(format!("failed to render records: {e}")))
}

pub async fn print_research_data(config: &SehaConfig, user: &str) -> Result<(), SehaError> {
    println!("{}", research_data_json(config, user).await?);
    Ok(())
}
