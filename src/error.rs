//! Error taxonomy for the claim audit engine.
//!
//! Mirrors the three error classes in the design: input-validation
//! failures from the data-model layer, redaction type errors from the
//! convenience entry point, and (separately, never surfaced here) rule
//! execution failures, which the registry contains as findings rather
//! than propagating.

use thiserror::Error;

/// Errors that can escape `audit(claim)` and its construction helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// A claim value failed to validate at construction time.
    #[error("invalid claim field `{field}`: {reason}")]
    InvalidClaim { field: String, reason: String },

    /// The redaction convenience function was given an unsupported type.
    #[error("cannot redact value of type `{type_name}`: {reason}")]
    Redaction { type_name: String, reason: String },
}

impl AuditError {
    pub fn invalid_claim(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AuditError::InvalidClaim {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn redaction(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        AuditError::Redaction {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

pub type AuditResult<T> = Result<T, AuditError>;
