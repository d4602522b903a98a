// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Model Adapter Infrastructure
//
// Coordinator-side clients implementing TaskAdapter, plus the routing table
// that owns them.

pub mod ollama_adapter_client;
pub mod registry;

pub use ollama_adapter_client::OllamaAdapterClient;
pub use registry::AdapterRegistry;
