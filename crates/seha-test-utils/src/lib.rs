// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Seha integration tests.
//!
//! Provides a mock model provider and a harness that wires a complete
//! [`ChatService`](seha_agent::ChatService) for fast, deterministic tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock model provider with scripted replies and failures
//! - [`TestHarness`] - Full pipeline over a memory or temp-file SQLite store

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
