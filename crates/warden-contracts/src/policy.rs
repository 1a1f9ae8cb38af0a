//! Policy table entry types.
//!
//! Each capability in the vocabulary has exactly one `CapabilityPolicy`
//! describing how decisions and projections treat it. The table itself lives
//! in warden-core; these types only describe its shape so that the decision
//! and projection code can stay free of per-capability conditionals.

use serde::Serialize;

use crate::capability::Capability;

/// The resource field compared against the principal's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerField {
    Id,
    OwnerId,
}

impl OwnerField {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerField::Id => "id",
            OwnerField::OwnerId => "owner_id",
        }
    }
}

/// How a supplied resource affects the decision for a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OwnershipRule {
    /// The resource is ignored; plain membership decides.
    Plain,
    /// When a resource is supplied, the principal's id must equal `field`
    /// on the resource. Membership is not consulted in that case.
    OwnerMatch { field: OwnerField },
}

/// One allow-listed field: read from `source`, written to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    pub source: &'static str,
    pub target: &'static str,
}

impl FieldMapping {
    /// A field copied under its own name.
    pub const fn same(name: &'static str) -> Self {
        Self {
            source: name,
            target: name,
        }
    }

    /// A field copied under a different name.
    pub const fn renamed(source: &'static str, target: &'static str) -> Self {
        Self { source, target }
    }
}

/// How an output value is shaped for a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutputRule {
    /// A single object reduced to `fields`.
    Fields {
        fields: &'static [FieldMapping],
        /// Output field that must equal the principal's id, if any.
        identity: Option<&'static str>,
        /// When true the principal must also hold the capability.
        gated: bool,
    },
    /// An array of objects, each reduced to `fields`.
    List { fields: &'static [FieldMapping] },
    /// Structural shape is checked by the external validator; the value
    /// passes through unchanged. `list` applies the check per element.
    Validated { list: bool },
}

/// Everything WARDEN knows about one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityPolicy {
    pub capability: Capability,
    pub ownership: OwnershipRule,
    /// Writable input fields, or `None` if the capability accepts no input.
    pub input: Option<&'static [FieldMapping]>,
    /// Output shaping, or `None` if the capability exposes nothing.
    pub output: Option<OutputRule>,
}
