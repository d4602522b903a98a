// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Pipeline Error Taxonomy
//!
//! Every hop in the chain (gateway, domain service, coordinator, adapter)
//! reports failures through [`PipelineError`]. The variant is the failure
//! *class*; the payload carries the hop name and enough context for the
//! ultimate caller to diagnose the failure without reading logs.
//!
//! | Variant | Wire kind | Meaning |
//! |---------|-----------|---------|
//! | `Validation` | `validation` | malformed or missing input, never retried |
//! | `UpstreamUnavailable` | `upstream_unavailable` | next hop could not be reached |
//! | `UpstreamRejected` | `upstream_rejected` | next hop answered with a failure |
//! | `Unsupported` | `unsupported` | unknown task type or unconfigured adapter |
//! | `Timeout` | `timeout` | deadline exceeded at some hop |
//! | `Authentication` | `authentication` | credential missing or rejected |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serializable name of a failure class, carried across hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    UpstreamUnavailable,
    UpstreamRejected,
    Unsupported,
    Timeout,
    Authentication,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::UpstreamRejected => "upstream_rejected",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Authentication => "authentication",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validation" => Ok(ErrorKind::Validation),
            "upstream_unavailable" => Ok(ErrorKind::UpstreamUnavailable),
            "upstream_rejected" => Ok(ErrorKind::UpstreamRejected),
            "unsupported" => Ok(ErrorKind::Unsupported),
            "timeout" => Ok(ErrorKind::Timeout),
            "authentication" => Ok(ErrorKind::Authentication),
            _ => Err(()),
        }
    }
}

/// Errors that can occur anywhere along the dispatch chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{hop} unavailable: {reason}")]
    UpstreamUnavailable { hop: String, reason: String },

    #[error("{hop} rejected the request: {message}")]
    UpstreamRejected {
        hop: String,
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    Unsupported(String),

    #[error("{hop} timed out: {reason}")]
    Timeout { hop: String, reason: String },

    #[error("authentication failed: {0}")]
    Authentication(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(_) => ErrorKind::Validation,
            PipelineError::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            PipelineError::UpstreamRejected { .. } => ErrorKind::UpstreamRejected,
            PipelineError::Unsupported(_) => ErrorKind::Unsupported,
            PipelineError::Timeout { .. } => ErrorKind::Timeout,
            PipelineError::Authentication(_) => ErrorKind::Authentication,
        }
    }

    /// Name of the hop that failed, when the failure happened downstream.
    pub fn hop(&self) -> Option<&str> {
        match self {
            PipelineError::UpstreamUnavailable { hop, .. }
            | PipelineError::UpstreamRejected { hop, .. }
            | PipelineError::Timeout { hop, .. } => Some(hop),
            _ => None,
        }
    }

    pub fn unavailable(hop: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::UpstreamUnavailable {
            hop: hop.into(),
            reason: reason.into(),
        }
    }

    pub fn rejected(hop: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        PipelineError::UpstreamRejected {
            hop: hop.into(),
            status,
            message: message.into(),
        }
    }

    pub fn timeout(hop: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::Timeout {
            hop: hop.into(),
            reason: reason.into(),
        }
    }

    /// Rebuild a failure reported by the next hop.
    ///
    /// A hop that reports `timeout` (or answers 504) stays a [`PipelineError::Timeout`]
    /// so that "too slow" never degrades into a generic rejection on the way up.
    /// Everything else becomes [`PipelineError::UpstreamRejected`].
    pub fn from_remote(
        hop: impl Into<String>,
        status: Option<u16>,
        kind: Option<ErrorKind>,
        message: impl Into<String>,
    ) -> Self {
        if kind == Some(ErrorKind::Timeout) || status == Some(504) {
            return PipelineError::timeout(hop, message);
        }
        PipelineError::rejected(hop, status, message)
    }

    /// Prefix the message with caller context, keeping the failure class.
    pub fn with_context(self, context: impl fmt::Display) -> Self {
        match self {
            PipelineError::Validation(msg) => PipelineError::Validation(format!("{}: {}", context, msg)),
            PipelineError::UpstreamUnavailable { hop, reason } => PipelineError::UpstreamUnavailable {
                hop,
                reason: format!("{}: {}", context, reason),
            },
            PipelineError::UpstreamRejected { hop, status, message } => PipelineError::UpstreamRejected {
                hop,
                status,
                message: format!("{}: {}", context, message),
            },
            PipelineError::Unsupported(msg) => PipelineError::Unsupported(format!("{}: {}", context, msg)),
            PipelineError::Timeout { hop, reason } => PipelineError::Timeout {
                hop,
                reason: format!("{}: {}", context, reason),
            },
            PipelineError::Authentication(msg) => {
                PipelineError::Authentication(format!("{}: {}", context, msg))
            }
        }
    }
}
