// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seha serve` command implementation.
//!
//! Wires the configured conversation store, the Anthropic provider and the
//! chat service into the HTTP gateway, then serves until SIGINT/SIGTERM.

use std::sync::Arc;

use seha_agent::{ChatOptions, ChatService, install_signal_handler};
use seha_anthropic::AnthropicProvider;
use seha_config::SehaConfig;
use seha_context::load_persona;
use seha_core::error::SehaError;
use seha_core::{ModelProvider, PluginAdapter};
use seha_gateway::{CookieSettings, GatewayState, ServerConfig, start_server};
use tracing::{info, warn};

/// Runs the `seha serve` command.
pub async fn run_serve(config: SehaConfig) -> Result<(), SehaError> {
    init_tracing(&config.agent.log_level);

    info!(name = %config.agent.name, "starting seha serve");

    let persona = load_persona(&config.agent).await;

    let store = seha_storage::open_store(&config.storage).await?;
    info!(backend = store.name(), "conversation store ready");

    let provider: Arc<dyn ModelProvider> = Arc::new(AnthropicProvider::new(&config)?);

    let service = Arc::new(ChatService::new(
        store.clone(),
        provider.clone(),
        persona,
        ChatOptions::from_config(&config),
    ));

    let state = GatewayState::new(
        service,
        CookieSettings {
            name: config.gateway.session_cookie.clone(),
            secure: config.gateway.secure_cookie,
        },
    );
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    let shutdown = install_signal_handler();
    let served = start_server(&server_config, state, shutdown).await;

    if let Err(e) = provider.shutdown().await {
        warn!(error = %e, "provider shutdown failed");
    }
    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "store shutdown failed");
    }

    served?;
    info!("seha stopped");
    Ok(())
}

/// Initializes the tracing subscriber with an environment filter.
///
/// `RUST_LOG` takes precedence over `agent.log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seha={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
