// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Static Token Validator
//
// Base credential policy: exact match against one configured secret.

use subtle::ConstantTimeEq;

use crate::domain::auth::{CredentialCheck, CredentialValidator, Identity};

pub struct StaticTokenValidator {
    secret: String,
    subject: String,
}

impl StaticTokenValidator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            subject: "api-client".to_string(),
        }
    }

    /// Identity reported for callers presenting the secret.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }
}

impl CredentialValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> CredentialCheck {
        if bool::from(token.as_bytes().ct_eq(self.secret.as_bytes())) {
            CredentialCheck::Valid(Identity::new(self.subject.clone()))
        } else {
            CredentialCheck::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let validator = StaticTokenValidator::new("valid-token");
        assert_eq!(
            validator.validate("valid-token"),
            CredentialCheck::Valid(Identity::new("api-client"))
        );
        assert_eq!(validator.validate("valid-token "), CredentialCheck::Invalid);
        assert_eq!(validator.validate("valid"), CredentialCheck::Invalid);
        assert_eq!(validator.validate(""), CredentialCheck::Invalid);
    }
}
