//! Principal and resource types.
//!
//! A `Principal` is handed to WARDEN by the authentication layer and stays
//! immutable for the whole request. A `Resource` is whatever the persistence
//! layer loaded; WARDEN only ever reads its `id` and `owner_id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::capability::CapabilitySet;

/// Opaque identifier of a principal or resource.
///
/// The authentication and persistence layers decide the id format; WARDEN
/// accepts strings and JSON numbers and only ever compares ids for equality.
/// A string never equals a number, even when they print the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Text(String),
    Number(Number),
}

impl OpaqueId {
    /// Return true if `value` is the JSON form of this id.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (OpaqueId::Text(s), Value::String(v)) => s == v,
            (OpaqueId::Number(n), Value::Number(v)) => n == v,
            _ => false,
        }
    }

    /// Empty strings and zero do not identify anybody.
    fn is_blank(&self) -> bool {
        match self {
            OpaqueId::Text(s) => s.is_empty(),
            OpaqueId::Number(n) => n.as_f64() == Some(0.0),
        }
    }
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpaqueId::Text(s) => f.write_str(s),
            OpaqueId::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OpaqueId {
    fn from(id: &str) -> Self {
        OpaqueId::Text(id.to_string())
    }
}

impl From<String> for OpaqueId {
    fn from(id: String) -> Self {
        OpaqueId::Text(id)
    }
}

impl From<u64> for OpaqueId {
    fn from(id: u64) -> Self {
        OpaqueId::Number(id.into())
    }
}

impl From<i64> for OpaqueId {
    fn from(id: i64) -> Self {
        OpaqueId::Number(id.into())
    }
}

/// The actor on whose behalf an operation runs.
///
/// `id` is absent for anonymous principals, which may still hold
/// capabilities such as `create:session`. The authentication layer has
/// historically called the capability list `features`; either key is
/// accepted when deserializing. Untyped principals carrying both keys go
/// through `warden_core::guard::principal_from_value`, which keeps
/// `capabilities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub id: Option<OpaqueId>,
    #[serde(alias = "features")]
    pub capabilities: CapabilitySet,
}

impl Principal {
    /// An identified principal holding `capabilities`.
    pub fn new<I, S>(id: impl Into<OpaqueId>, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Some(id.into()),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// A principal with no identity, e.g. a visitor that has not logged in.
    pub fn anonymous<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Return true if this principal's id equals `other`.
    ///
    /// Anonymous principals match nothing.
    pub fn is(&self, other: &OpaqueId) -> bool {
        self.id.as_ref().is_some_and(|id| id == other)
    }

    /// Return true if `value`, an identity field read from an output
    /// object, names this principal.
    ///
    /// Both sides must be present and non-blank.
    pub fn is_identified_by(&self, value: &Value) -> bool {
        self.id
            .as_ref()
            .is_some_and(|id| !id.is_blank() && id.matches(value))
    }
}

/// The two fields WARDEN reads from a domain object for ownership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: Option<OpaqueId>,
    #[serde(default)]
    pub owner_id: Option<OpaqueId>,
}

impl Resource {
    /// A resource identified by `id`, with no recorded owner.
    pub fn with_id(id: impl Into<OpaqueId>) -> Self {
        Self {
            id: Some(id.into()),
            owner_id: None,
        }
    }

    /// A resource owned by `owner_id`.
    pub fn owned_by(owner_id: impl Into<OpaqueId>) -> Self {
        Self {
            id: None,
            owner_id: Some(owner_id.into()),
        }
    }
}
