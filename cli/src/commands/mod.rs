// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the PrivacyPilot CLI

pub mod client;
pub mod serve;

pub use self::client::ClientArgs;
pub use self::serve::{AnonymizerArgs, CoordinatorArgs, GatewayArgs, ModerationArgs, OllamaAdapterArgs};
