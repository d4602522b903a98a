// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod adapters;
pub mod coordinator_client;
pub mod http;
pub mod llm;
pub mod proxy;
pub mod static_token;

pub use coordinator_client::CoordinatorClient;
pub use proxy::DownstreamProxy;
pub use static_token::StaticTokenValidator;
