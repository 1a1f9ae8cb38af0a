//! # warden-verify
//!
//! Structural output validation for the WARDEN authorization layer.
//!
//! This crate provides [`engine::SchemaValidator`], which implements the
//! [`warden_core::traits::OutputValidator`] trait. Content reads are checked
//! against a JSON Schema document via the `jsonschema` crate and, when they
//! match, handed back unchanged.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use warden_core::Authorizer;
//! use warden_verify::engine::SchemaValidator;
//!
//! let authorizer = Authorizer::new(Box::new(SchemaValidator::with_defaults()?));
//! let shown = authorizer.filter_output(&principal, "read:content", &row)?;
//! ```

pub mod engine;

pub use engine::{default_content_schema, SchemaValidator};
