//! TOML-driven route table.
//!
//! `RouteTable` loads a `RouteConfig`, binds a `RequestGuard` to every rule,
//! and answers "which gate applies to this request?".
//!
//! Lookup algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. The first rule whose `method` and `path` match supplies the guard.
//! 3. If no rule matched, the route is ungated and the request passes.

use std::path::Path;

use tracing::debug;

use warden_contracts::error::{WardenError, WardenResult};
use warden_core::traits::RequestContext;

use crate::{
    guard::RequestGuard,
    rule::{RouteConfig, RouteRule},
};

#[derive(Debug)]
struct BoundRoute {
    rule: RouteRule,
    guard: RequestGuard,
}

/// An ordered set of route bindings, each with its capability gate.
///
/// ```rust,ignore
/// use warden_routes::RouteTable;
///
/// let table = RouteTable::from_file(Path::new("config/routes.toml"))?;
/// table.check("POST", "/api/v1/contents", &principal)?;
/// ```
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<BoundRoute>,
}

impl RouteTable {
    /// Bind every rule in `config`.
    ///
    /// Returns `ContractViolation` for the first rule naming a capability
    /// outside the vocabulary.
    pub fn from_config(config: RouteConfig) -> WardenResult<Self> {
        let routes = config
            .routes
            .into_iter()
            .map(|rule| {
                let guard = RequestGuard::new(&rule.capability)?;
                Ok(BoundRoute { rule, guard })
            })
            .collect::<WardenResult<Vec<_>>>()?;
        Ok(Self { routes })
    }

    /// Parse `s` as TOML and build a `RouteTable`.
    ///
    /// Returns `WardenError::ConfigError` if the TOML is malformed or does
    /// not match the expected `RouteConfig` schema.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        let config: RouteConfig = toml::from_str(s).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse route TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as TOML route configuration.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to read route file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Return the guard for the first rule matching `method` and `path`.
    pub fn guard_for(&self, method: &str, path: &str) -> Option<&RequestGuard> {
        let bound = self.routes.iter().find(|r| r.rule.matches(method, path));
        match bound {
            Some(bound) => {
                debug!(
                    route_id = %bound.rule.id,
                    method,
                    path,
                    capability = %bound.guard.capability(),
                    "route matched"
                );
                Some(&bound.guard)
            }
            None => {
                debug!(method, path, "no route rule matched; request is ungated");
                None
            }
        }
    }

    /// Gate one request: find its route and run that route's guard.
    pub fn check<C: RequestContext + ?Sized>(&self, method: &str, path: &str, ctx: &C) -> WardenResult<()> {
        match self.guard_for(method, path) {
            Some(guard) => guard.check(ctx),
            None => Ok(()),
        }
    }
}
