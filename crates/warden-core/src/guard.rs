//! Precondition checks run before any decision or projection.
//!
//! Every failure here is a `ContractViolation`: it means the caller passed
//! something WARDEN cannot reason about, not that the principal was refused.

use serde_json::Value;
use tracing::warn;

use warden_contracts::{
    capability::Capability,
    error::{WardenError, WardenResult},
    principal::Principal,
};

/// Which payload a projection was given, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Input,
    Output,
}

impl PayloadKind {
    fn as_str(self) -> &'static str {
        match self {
            PayloadKind::Input => "input",
            PayloadKind::Output => "output",
        }
    }
}

/// Resolve `token` against the vocabulary.
pub fn validate_capability(token: &str) -> WardenResult<Capability> {
    if token.is_empty() {
        warn!("authorization invoked without a capability token");
        return Err(WardenError::contract_violation(
            "no capability token was given for the authorization check",
        ));
    }

    Capability::parse(token).ok_or_else(|| {
        warn!(capability = %token, "capability token is not in the vocabulary");
        WardenError::contract_violation_with(
            format!("capability '{token}' is not in the capability vocabulary"),
            token,
        )
    })
}

/// Reject an absent (`null`) payload.
pub fn validate_payload(payload: &Value, kind: PayloadKind) -> WardenResult<()> {
    if payload.is_null() {
        warn!(payload = kind.as_str(), "projection invoked without a payload");
        return Err(WardenError::contract_violation(format!(
            "no {} was given for the filter operation",
            kind.as_str()
        )));
    }
    Ok(())
}

/// Unwrap a principal that may not have been attached to the request.
pub fn require_principal(principal: Option<&Principal>) -> WardenResult<&Principal> {
    principal.ok_or_else(|| {
        warn!("authorization invoked without a principal");
        WardenError::contract_violation("no principal was given for the authorization check")
    })
}

/// Build a `Principal` from untyped JSON handed over by an authentication layer.
///
/// The value must be an object whose `capabilities` (or legacy `features`)
/// field is an array of strings. When both keys are present `capabilities`
/// wins and `features` is ignored. `id` may be a string or a number.
pub fn principal_from_value(value: &Value) -> WardenResult<Principal> {
    let object = match value {
        Value::Null => {
            warn!("authorization invoked without a principal");
            return Err(WardenError::contract_violation(
                "no principal was given for the authorization check",
            ));
        }
        Value::Object(object) => object,
        other => {
            warn!("principal is not an object");
            return Err(WardenError::contract_violation_with(
                "principal is not an object",
                other.to_string(),
            ));
        }
    };

    let mut object = object.clone();
    if object.contains_key("capabilities") {
        object.remove("features");
    }

    let capabilities = object.get("capabilities").or_else(|| object.get("features"));
    if !matches!(capabilities, Some(Value::Array(_))) {
        warn!("principal has no capabilities array");
        return Err(WardenError::contract_violation(
            "principal has no 'capabilities' field or it is not an array",
        ));
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        warn!(error = %e, "principal could not be decoded");
        WardenError::contract_violation_with("principal could not be decoded", e.to_string())
    })
}
