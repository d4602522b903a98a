// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Deadline
//!
//! Request budget shared by every hop of a single logical call.
//!
//! The inbound request fixes an absolute deadline once. Each outbound call then
//! uses `min(remaining budget, hop ceiling)` as its timeout and forwards that
//! figure in the [`DEADLINE_HEADER`] header, so the next hop starts from what is
//! left instead of a fresh timer. Depth of the chain never inflates the total.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use super::error::PipelineError;

/// Remaining budget in milliseconds, sent on every outbound hop.
pub const DEADLINE_HEADER: &str = "x-request-timeout-ms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    /// Derive the inbound deadline from the caller's header, capped by this
    /// service's own request budget. A missing or garbled header means the
    /// caller expressed no budget.
    pub fn from_header(value: Option<&str>, budget: Duration) -> Self {
        let caller_budget = value
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis);

        match caller_budget {
            Some(caller) => Self::after(caller.min(budget)),
            None => Self::after(budget),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Timeout to apply to a call towards `hop`: `min(remaining, ceiling)`.
    ///
    /// Fails without touching the network once the budget is spent.
    pub fn timeout_for(&self, hop: &str, ceiling: Duration) -> Result<Duration, PipelineError> {
        let remaining = self.remaining();
        if remaining.is_zero() {
            return Err(PipelineError::timeout(
                hop,
                "request deadline already exceeded before the call was issued",
            ));
        }
        Ok(remaining.min(ceiling))
    }

    /// Header value announcing `timeout` to the next hop.
    pub fn header_value(timeout: Duration) -> String {
        timeout.as_millis().max(1).to_string()
    }

    /// Run `work` under this deadline. Dropping the future on expiry abandons
    /// every outbound call it still has in flight.
    pub async fn run<T, F>(&self, hop: &str, work: F) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        match tokio::time::timeout_at(self.expires_at, work).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::timeout(hop, "request deadline exceeded")),
        }
    }
}
