//! Route rule types and configuration schema.
//!
//! A `RouteConfig` is deserialized from TOML and holds an ordered list of
//! `RouteRule`s. Rules are matched in declaration order — the first rule
//! whose method and path match a request decides which capability gates it.

use serde::{Deserialize, Serialize};

/// A single route binding loaded from TOML.
///
/// `method` is `"*"` or an HTTP method (compared case-insensitively).
/// `path` is `"*"`, an exact path, or a prefix ending in `"/*"` such as
/// `"/api/v1/contents/*"`, which matches every path below that prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRule {
    /// Stable identifier used in logs and error messages.
    pub id: String,

    /// Human-readable explanation of what this route does.
    #[serde(default)]
    pub description: String,

    pub method: String,

    pub path: String,

    /// The capability token a principal must hold to reach this route.
    pub capability: String,
}

impl RouteRule {
    /// Return true if this rule matches the given `method` and `path`.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        let method_matches = self.method == "*" || self.method.eq_ignore_ascii_case(method);
        let path_matches = if self.path == "*" {
            true
        } else if let Some(prefix) = self.path.strip_suffix("/*") {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        } else {
            self.path == path
        };
        method_matches && path_matches
    }
}

/// The top-level structure deserialized from a TOML route file.
///
/// Example:
/// ```toml
/// [[routes]]
/// id = "create-user"
/// description = "Sign up"
/// method = "POST"
/// path = "/api/v1/users"
/// capability = "create:user"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Ordered list of routes. First match wins.
    #[serde(default)]
    pub routes: Vec<RouteRule>,
}
