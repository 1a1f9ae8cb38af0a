//! # warden-routes
//!
//! Request-pipeline gating for the WARDEN authorization layer.
//!
//! ## Overview
//!
//! [`RequestGuard`] binds one capability token and turns a failed check into
//! `WardenError::AuthorizationDenied` — the only user-facing denial WARDEN
//! raises. [`RouteTable`] loads route bindings from a TOML file, binds a
//! guard per route, and evaluates the first matching one for each request.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use warden_routes::RouteTable;
//!
//! let routes = RouteTable::from_file(Path::new("config/routes.toml"))?;
//! routes.check("PATCH", "/api/v1/contents/42", &request_context)?;
//! ```
//!
//! ## Rule matching
//!
//! Each rule specifies a `method` and `path` pattern. Both support the
//! wildcard `"*"`; `path` also accepts a `"/*"` suffix for a subtree. Rules
//! are applied in declaration order; the first match wins. A request that
//! matches no rule is not gated.

pub mod guard;
pub mod rule;
pub mod table;

pub use guard::{RequestGuard, DENIAL_CODE};
pub use rule::{RouteConfig, RouteRule};
pub use table::RouteTable;

// ── Tests ─────────────────────────────────────────────────────────────────────
