//! Input and output projection.
//!
//! Projectors reduce a payload to the fields a capability may write or read.
//! They are data-shaping functions, not gates: when the principal is not
//! authorized they return an empty object rather than an error. Callers that
//! need a hard failure must check [`can`](crate::decision::can) themselves.
//!
//! Projection copies values verbatim. A field that is absent from the source
//! is absent from the result; a field that is present with a JSON `null` is
//! copied as `null`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use warden_contracts::{
    capability::Capability,
    error::{WardenError, WardenResult},
    policy::{FieldMapping, OutputRule},
    principal::Principal,
};

use crate::{
    decision::is_permitted,
    guard::{self, PayloadKind},
    policy::policy_for,
    traits::OutputValidator,
};

fn empty() -> Value {
    Value::Object(Map::new())
}

/// Copy the allow-listed fields of `source` that are actually present.
///
/// A non-object source has no fields, so the result is empty.
fn project(source: &Value, fields: &[FieldMapping]) -> Value {
    let mut projected = Map::new();
    for mapping in fields {
        if let Some(value) = source.get(mapping.source) {
            projected.insert(mapping.target.to_string(), value.clone());
        }
    }
    Value::Object(projected)
}

fn expect_list(capability: Capability, output: &Value) -> WardenResult<&Vec<Value>> {
    output.as_array().ok_or_else(|| {
        WardenError::contract_violation_with(
            format!("capability '{capability}' expects a list output"),
            output.to_string(),
        )
    })
}

/// Reduce `input` to the fields `token` may write.
///
/// Returns an empty object when the principal lacks the capability or when
/// the capability accepts no input.
pub fn filter_input(principal: &Principal, token: &str, input: &Value) -> WardenResult<Value> {
    let capability = guard::validate_capability(token)?;
    guard::validate_payload(input, PayloadKind::Input)?;

    let Some(fields) = policy_for(capability).input else {
        debug!(capability = %capability, "capability accepts no input; dropping every field");
        return Ok(empty());
    };

    if !is_permitted(principal, capability, None) {
        warn!(
            principal = ?principal.id,
            capability = %capability,
            "input filtered to nothing: capability not held"
        );
        return Ok(empty());
    }

    Ok(project(input, fields))
}

/// Reduce `output` to the fields `token` may read.
///
/// Identity-checked reads (`read:session`, `create:session`, `read:user:self`)
/// yield an empty object unless the principal's id equals the output's
/// identity field. List reads project every element and preserve order.
/// Content reads are handed to `validator` and pass through unchanged.
pub fn filter_output(
    principal: &Principal,
    token: &str,
    output: &Value,
    validator: &dyn OutputValidator,
) -> WardenResult<Value> {
    let capability = guard::validate_capability(token)?;
    guard::validate_payload(output, PayloadKind::Output)?;

    let Some(rule) = policy_for(capability).output else {
        debug!(capability = %capability, "capability exposes no output; dropping every field");
        return Ok(empty());
    };

    match rule {
        OutputRule::Fields { fields, identity, gated } => {
            if gated && !is_permitted(principal, capability, None) {
                warn!(
                    principal = ?principal.id,
                    capability = %capability,
                    "output filtered to nothing: capability not held"
                );
                return Ok(empty());
            }

            if let Some(field) = identity {
                let matches = output
                    .get(field)
                    .is_some_and(|owner| principal.is_identified_by(owner));
                if !matches {
                    warn!(
                        principal = ?principal.id,
                        capability = %capability,
                        identity_field = field,
                        "output filtered to nothing: identity mismatch"
                    );
                    return Ok(empty());
                }
            }

            Ok(project(output, fields))
        }

        OutputRule::List { fields } => {
            let items = expect_list(capability, output)?;
            Ok(Value::Array(items.iter().map(|item| project(item, fields)).collect()))
        }

        OutputRule::Validated { list: false } => validator.validate(capability, output),

        OutputRule::Validated { list: true } => {
            let items = expect_list(capability, output)?;
            let validated = items
                .iter()
                .map(|item| validator.validate(capability, item))
                .collect::<WardenResult<Vec<Value>>>()?;
            Ok(Value::Array(validated))
        }
    }
}
