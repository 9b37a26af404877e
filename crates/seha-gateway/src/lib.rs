// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Seha.
//!
//! Exposes the chat backend over a small JSON API:
//!
//! - `POST /login` starts a session (cookie plus token in the body)
//! - `POST /chat` runs one exchange for the session user
//! - `GET /research_data` returns the user's stored annotations
//! - `POST /logout` ends the session
//! - `GET /health` reports adapter health (unauthenticated)

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{
    CookieSettings, GatewayState, HealthState, ServerConfig, build_router, start_server,
};
