// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request orchestration for Seha.
//!
//! [`ChatService`] owns the per-request pipeline: resolve the session, load
//! the user's conversation state, build the context window, call the model,
//! parse the trailing annotation and persist the updated state. The gateway
//! and the CLI both drive the backend exclusively through it.

pub mod service;
pub mod session;
pub mod shutdown;

pub use service::{ChatOptions, ChatOutcome, ChatService};
pub use session::SessionRegistry;
pub use shutdown::install_signal_handler;
