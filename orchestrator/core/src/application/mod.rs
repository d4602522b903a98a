// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod anonymization;
pub mod coordinator;
pub mod model_anonymizer;
pub mod moderation;

// Re-export services for convenience
pub use anonymization::AnonymizationService;
pub use coordinator::TaskCoordinator;
pub use model_anonymizer::ModelAnonymizer;
pub use moderation::ModerationService;
