// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Adapter Registry - Task Type Routing Table
//
// Maps every known task type to at most one adapter. Built once at startup
// from the adapters' capability sets, then shared read-only.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::adapter::TaskAdapter;
use crate::domain::task::TaskType;

#[derive(Default, Clone)]
pub struct AdapterRegistry {
    routes: BTreeMap<TaskType, Arc<dyn TaskAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter` for every task type in its capability set.
    ///
    /// Routing is one-to-one: a task type already owned by another adapter
    /// is a startup error.
    pub fn register(&mut self, adapter: Arc<dyn TaskAdapter>) -> anyhow::Result<()> {
        let descriptor = adapter.descriptor();
        for task_type in &descriptor.capabilities {
            if let Some(owner) = self.routes.get(task_type) {
                anyhow::bail!(
                    "task type '{}' is already routed to adapter '{}', cannot also route it to '{}'",
                    task_type,
                    owner.descriptor().name,
                    descriptor.name
                );
            }
        }

        for task_type in &descriptor.capabilities {
            info!(
                "Routing task type '{}' -> adapter '{}' ({})",
                task_type, descriptor.name, descriptor.base_url
            );
            self.routes.insert(*task_type, adapter.clone());
        }
        Ok(())
    }

    pub fn route(&self, task_type: TaskType) -> Option<&Arc<dyn TaskAdapter>> {
        self.routes.get(&task_type)
    }

    /// Task types with a configured adapter, in stable order.
    pub fn task_types(&self) -> Vec<TaskType> {
        self.routes.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
