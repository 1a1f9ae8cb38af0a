//! # warden-contracts
//!
//! Shared types and error definitions for the WARDEN authorization layer.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate — only the capability vocabulary, principal/resource shapes,
//! policy table entry types, and errors.

pub mod capability;
pub mod error;
pub mod policy;
pub mod principal;
