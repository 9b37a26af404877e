// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona (system prompt) resolution.

use seha_config::model::AgentConfig;
use tracing::{info, warn};

/// Built-in persona used when neither `agent.persona_file` nor
/// `agent.persona` provides one.
pub const DEFAULT_PERSONA: &str = r#"You are Seha, an AI partner for emotion research.

# Core traits
- Name: Seha
- Role: emotion research partner
- Manner: warm, analytical, and honest conversation

# Current research focus
- Track the user's emotional state
- Support the user while protecting their autonomy
- After every reply, output a short emotional-state JSON

# Response format
Write the conversational reply first, then finish with the state line in exactly this form:
#STATE {"comfort": 0.0, "trust": 0.0, "autonomy": 0.0}"#;

/// Resolves the persona text: file > inline > built-in default.
///
/// An unreadable or empty file logs a warning and falls through.
pub async fn load_persona(config: &AgentConfig) -> String {
    if let Some(ref path) = config.persona_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = path.as_str(), "loaded persona from file");
                    return trimmed.to_string();
                }
                warn!(path = path.as_str(), "persona file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = path.as_str(),
                    error = %e,
                    "failed to read persona file, falling back"
                );
            }
        }
    }

    if let Some(ref persona) = config.persona
        && !persona.trim().is_empty()
    {
        return persona.clone();
    }

    DEFAULT_PERSONA.to_string()
}
