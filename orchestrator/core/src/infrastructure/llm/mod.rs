// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each provider translates between the domain LLMProvider interface and one
// external API.

pub mod ollama;

pub use ollama::OllamaProvider;
