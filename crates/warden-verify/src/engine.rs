//! JSON Schema output validator.
//!
//! `SchemaValidator` implements the `OutputValidator` trait from
//! `warden-core`. Content reads are not shaped by an allow-list; their
//! structure is owned by a JSON Schema document per capability. A value that
//! satisfies the schema passes through unchanged. A value that does not is
//! rejected with every violation listed, so operators see the full failure
//! set in one pass.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, warn};

use warden_contracts::{
    capability::Capability,
    error::{WardenError, WardenResult},
};
use warden_core::traits::OutputValidator;

/// The schema registered for content reads by [`SchemaValidator::with_defaults`].
pub fn default_content_schema() -> Value {
    let nullable_string = json!({ "type": ["string", "null"] });
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "owner_id": { "type": "string" },
            "parent_id": nullable_string,
            "slug": { "type": "string", "minLength": 1 },
            "title": nullable_string,
            "body": nullable_string,
            "status": { "enum": ["draft", "published", "deleted"] },
            "source_url": nullable_string,
            "created_at": { "type": "string" },
            "updated_at": { "type": "string" },
            "published_at": nullable_string,
            "deleted_at": nullable_string
        },
        "required": ["id", "owner_id", "slug", "status"]
    })
}

/// Structural validator backed by compiled JSON Schema documents.
///
/// Capabilities without a registered schema are passed through unchecked.
pub struct SchemaValidator {
    schemas: HashMap<Capability, jsonschema::Validator>,
}

impl SchemaValidator {
    /// Create a validator with no schemas registered.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create a validator with [`default_content_schema`] registered for
    /// `read:content` and `read:content:list`.
    pub fn with_defaults() -> WardenResult<Self> {
        let mut validator = Self::new();
        let content = default_content_schema();
        validator.register_schema(Capability::ReadContent, &content)?;
        validator.register_schema(Capability::ReadContentList, &content)?;
        Ok(validator)
    }

    /// Compile `schema` and register it for `capability`, replacing any
    /// schema registered before.
    ///
    /// Returns `WardenError::ConfigError` if the document is not a valid
    /// JSON Schema.
    pub fn register_schema(&mut self, capability: Capability, schema: &Value) -> WardenResult<()> {
        let compiled = jsonschema::validator_for(schema).map_err(|e| {
            warn!(capability = %capability, error = %e, "schema compilation failure");
            WardenError::ConfigError {
                reason: format!("invalid JSON Schema document for '{capability}': {e}"),
            }
        })?;
        self.schemas.insert(capability, compiled);
        Ok(())
    }

    /// Return true if a schema is registered for `capability`.
    pub fn has_schema(&self, capability: Capability) -> bool {
        self.schemas.contains_key(&capability)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputValidator for SchemaValidator {
    fn validate(&self, capability: Capability, value: &Value) -> WardenResult<Value> {
        let Some(schema) = self.schemas.get(&capability) else {
            debug!(capability = %capability, "no schema registered; passing output through");
            return Ok(value.clone());
        };

        let violations: Vec<String> = schema
            .iter_errors(value)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();

        if violations.is_empty() {
            debug!(capability = %capability, "output matched schema");
            return Ok(value.clone());
        }

        warn!(
            capability = %capability,
            violation_count = violations.len(),
            "output rejected by schema"
        );
        Err(WardenError::SchemaValidation {
            reason: format!(
                "output for '{capability}' does not match its schema: {}",
                violations.join("; ")
            ),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
