// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! PrivacyPilot Rust SDK
//!
//! Typed access to the API gateway: anonymization and content moderation.

pub mod client;
pub mod error;

pub use client::PrivacyPilotClient;
pub use error::{ClientError, Result};
pub use privacypilot_core::domain::requests::{AnonymizeResponse, ModerationVerdict};
