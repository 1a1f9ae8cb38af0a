//! Route-level capability gate.
//!
//! `RequestGuard` is the only place WARDEN turns a negative decision into a
//! user-facing failure. It is bound to one capability when the route is
//! registered and evaluated once per matching request, without a resource:
//! instance-level checks belong in the handler.

use tracing::{debug, warn};

use warden_contracts::{
    capability::Capability,
    error::{WardenError, WardenResult},
};
use warden_core::{decision::is_permitted, guard, traits::RequestContext};

/// Stable code carried by every denial raised by a `RequestGuard`.
pub const DENIAL_CODE: &str = "AUTHORIZATION:REQUEST_GUARD:CAPABILITY_NOT_HELD";

/// A gate that admits requests whose principal holds one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestGuard {
    capability: Capability,
}

impl RequestGuard {
    /// Bind a guard to `token`.
    ///
    /// Returns `ContractViolation` if `token` is not in the vocabulary, so a
    /// misspelled route binding fails at registration rather than per request.
    pub fn new(token: &str) -> WardenResult<Self> {
        Ok(Self::for_capability(guard::validate_capability(token)?))
    }

    pub fn for_capability(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Admit or refuse the request described by `ctx`.
    ///
    /// # Errors
    ///
    /// - `ContractViolation` if no principal is attached to the request.
    /// - `AuthorizationDenied` if the principal does not hold the capability.
    pub fn check<C: RequestContext + ?Sized>(&self, ctx: &C) -> WardenResult<()> {
        let principal = guard::require_principal(ctx.principal())?;

        if is_permitted(principal, self.capability, None) {
            debug!(
                principal = ?principal.id,
                capability = %self.capability,
                "request admitted"
            );
            return Ok(());
        }

        warn!(
            principal = ?principal.id,
            capability = %self.capability,
            code = DENIAL_CODE,
            "request denied: capability not held"
        );
        Err(WardenError::AuthorizationDenied {
            code: DENIAL_CODE.to_string(),
            message: "principal may not perform this operation".to_string(),
            action: format!("check that the principal holds the \"{}\" capability", self.capability),
        })
    }
}
