// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Domain model of the dispatch pipeline: task envelope, adapter and provider
//! capabilities, deadlines, credentials and the error taxonomy.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Types and traits shared by every service in the chain

pub mod adapter;
pub mod auth;
pub mod deadline;
pub mod error;
pub mod llm;
pub mod requests;
pub mod service_config;
pub mod task;
