//! Trait seams to WARDEN's external collaborators.
//!
//! - `OutputValidator` — the structural validator that owns the shape of
//!   content reads
//! - `RequestContext`  — request-scoped state supplied by the routing layer
//!
//! Neither is implemented here: warden-verify provides a JSON Schema
//! validator, and the routing layer provides its own request context.

use serde_json::Value;

use warden_contracts::{capability::Capability, error::WardenResult, principal::Principal};

/// Structural validation for outputs whose shape is not an allow-list.
///
/// Implementations must be deterministic and free of I/O. They return the
/// value to hand back to the client, which for a passing check is normally
/// the input unchanged.
pub trait OutputValidator: Send + Sync {
    /// Check one output object produced under `capability`.
    ///
    /// Returns `WardenError::SchemaValidation` when the value does not match.
    fn validate(&self, capability: Capability, value: &Value) -> WardenResult<Value>;
}

/// Request-scoped state as seen by route gating.
pub trait RequestContext {
    /// The authenticated principal, or `None` if authentication never ran.
    fn principal(&self) -> Option<&Principal>;
}

impl RequestContext for Principal {
    fn principal(&self) -> Option<&Principal> {
        Some(self)
    }
}

impl RequestContext for Option<Principal> {
    fn principal(&self) -> Option<&Principal> {
        self.as_ref()
    }
}
