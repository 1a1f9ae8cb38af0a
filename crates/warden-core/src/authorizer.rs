//! The handler-facing authorizer.
//!
//! A request handler typically runs three steps against one principal:
//!
//!   can → filter_input → (domain work) → filter_output
//!
//! `Authorizer` bundles those calls with the output validator so a handler
//! holds one value instead of threading the validator through every call.
//! It keeps no state between calls and is safe to share across threads.

use serde_json::Value;

use warden_contracts::{
    error::WardenResult,
    principal::{Principal, Resource},
};

use crate::{decision, projection, traits::OutputValidator};

pub struct Authorizer {
    validator: Box<dyn OutputValidator>,
}

impl Authorizer {
    /// Create an authorizer that delegates content reads to `validator`.
    pub fn new(validator: Box<dyn OutputValidator>) -> Self {
        Self { validator }
    }

    /// See [`decision::can`].
    pub fn can(&self, principal: &Principal, token: &str, resource: Option<&Resource>) -> WardenResult<bool> {
        decision::can(principal, token, resource)
    }

    /// See [`projection::filter_input`].
    pub fn filter_input(&self, principal: &Principal, token: &str, input: &Value) -> WardenResult<Value> {
        projection::filter_input(principal, token, input)
    }

    /// See [`projection::filter_output`].
    pub fn filter_output(&self, principal: &Principal, token: &str, output: &Value) -> WardenResult<Value> {
        projection::filter_output(principal, token, output, self.validator.as_ref())
    }
}
