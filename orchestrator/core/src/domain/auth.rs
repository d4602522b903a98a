// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Credential validation capability used by the gateway's authentication gate.
//!
//! The gate only depends on [`CredentialValidator`]; the shipped
//! implementation compares against one static secret
//! (`infrastructure::static_token`). Signed-token verification plugs in here.

/// Authenticated caller, attached to the request once the gate admits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Valid(Identity),
    Invalid,
}

pub trait CredentialValidator: Send + Sync {
    fn validate(&self, token: &str) -> CredentialCheck;
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme must be `Bearer` (any case) followed by a non-empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token("Bearer valid-token"), Some("valid-token"));
        assert_eq!(bearer_token("bearer   spaced "), Some("spaced"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("valid-token"), None);
    }
}
