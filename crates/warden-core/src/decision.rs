//! The authorization decision.
//!
//! Base rule: a principal may act under a capability it holds. When a
//! resource is supplied and the capability's policy entry carries an
//! owner-match rule, ownership replaces membership entirely; holding the
//! token is then neither necessary nor sufficient.

use tracing::debug;

use warden_contracts::{
    capability::Capability,
    error::WardenResult,
    policy::{OwnerField, OwnershipRule},
    principal::{Principal, Resource},
};

use crate::{guard, policy::policy_for};

/// Decide whether `principal` may act under `token`, optionally on `resource`.
///
/// Returns `ContractViolation` if `token` is not in the vocabulary; a
/// negative decision is `Ok(false)`, never an error.
pub fn can(principal: &Principal, token: &str, resource: Option<&Resource>) -> WardenResult<bool> {
    let capability = guard::validate_capability(token)?;
    Ok(is_permitted(principal, capability, resource))
}

/// Typed form of [`can`] for callers that already hold a `Capability`.
pub fn is_permitted(principal: &Principal, capability: Capability, resource: Option<&Resource>) -> bool {
    let held = principal.capabilities.has(capability);

    let permitted = match (policy_for(capability).ownership, resource) {
        (OwnershipRule::OwnerMatch { field }, Some(resource)) => {
            let owner = match field {
                OwnerField::Id => resource.id.as_ref(),
                OwnerField::OwnerId => resource.owner_id.as_ref(),
            };
            let owns = owner.is_some_and(|owner| principal.is(owner));
            debug!(
                capability = %capability,
                field = field.as_str(),
                held,
                owns,
                "ownership rule replaced membership check"
            );
            owns
        }
        _ => held,
    };

    debug!(
        principal = ?principal.id,
        capability = %capability,
        with_resource = resource.is_some(),
        permitted,
        "authorization decision"
    );

    permitted
}
