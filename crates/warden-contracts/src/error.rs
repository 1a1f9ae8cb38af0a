//! Error types for the WARDEN authorization layer.
//!
//! Two kinds of failure matter to callers and must stay distinct:
//!
//! - `ContractViolation` means the caller misused WARDEN (unknown capability
//!   token, malformed principal, missing payload). It is not actionable by the
//!   end user; support traces it through `error_id`.
//! - `AuthorizationDenied` is the user-facing refusal raised by route gating.
//!
//! Projectors never raise `AuthorizationDenied`: an unauthorized projection
//! silently yields an empty record.

use thiserror::Error;
use uuid::Uuid;

/// The unified error type for WARDEN.
#[derive(Debug, Error)]
pub enum WardenError {
    /// WARDEN was invoked with structurally invalid arguments.
    #[error("contract violation: {message}; contact support quoting the error id {error_id}")]
    ContractViolation {
        /// Correlation identifier for support staff.
        error_id: Uuid,
        /// What was wrong with the invocation.
        message: String,
        /// The offending value, when there is one worth recording.
        context: Option<String>,
    },

    /// The principal lacks the capability a route requires.
    #[error("forbidden [{code}]: {message}. {action}")]
    AuthorizationDenied {
        /// Stable machine-readable code identifying the denial site.
        code: String,
        /// Human-readable statement of the denial.
        message: String,
        /// Remediation hint naming the missing capability.
        action: String,
    },

    /// The external structural validator rejected an output value.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// Route or validator configuration is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl WardenError {
    /// Build a `ContractViolation` with a fresh correlation id.
    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            error_id: Uuid::new_v4(),
            message: message.into(),
            context: None,
        }
    }

    /// Build a `ContractViolation` that records the offending value.
    pub fn contract_violation_with(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::ContractViolation {
            error_id: Uuid::new_v4(),
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// True for caller-bug errors, false for everything user-facing.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}

/// Convenience alias used throughout the WARDEN crates.
pub type WardenResult<T> = Result<T, WardenError>;
