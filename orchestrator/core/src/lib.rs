// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Task-dispatch pipeline shared by every PrivacyPilot service: the gateway,
//! the anonymizer and moderation services, the AI coordinator and the Ollama
//! adapter.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, application services, outbound clients and
//!   HTTP routers; the `privacypilot` binary only wires them together

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
