//! The closed capability vocabulary.
//!
//! WARDEN recognizes a fixed set of capability tokens. Adding a token is a
//! code change, never a configuration change: any string outside
//! [`Capability::VOCABULARY`] is a programmer error wherever it appears.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability token drawn from the closed vocabulary.
///
/// Tokens are namespaced `verb:noun[:qualifier]` strings such as
/// `"read:user:self"`. The enum serializes as that token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "create:user")]
    CreateUser,
    #[serde(rename = "read:user")]
    ReadUser,
    #[serde(rename = "read:user:self")]
    ReadUserSelf,
    #[serde(rename = "read:user:list")]
    ReadUserList,
    #[serde(rename = "update:user")]
    UpdateUser,
    #[serde(rename = "read:migration")]
    ReadMigration,
    #[serde(rename = "create:migration")]
    CreateMigration,
    #[serde(rename = "read:activation_token")]
    ReadActivationToken,
    #[serde(rename = "create:session")]
    CreateSession,
    #[serde(rename = "read:session")]
    ReadSession,
    #[serde(rename = "read:content")]
    ReadContent,
    #[serde(rename = "update:content")]
    UpdateContent,
    #[serde(rename = "create:content")]
    CreateContent,
    #[serde(rename = "create:content:text_root")]
    CreateContentTextRoot,
    #[serde(rename = "create:content:text_child")]
    CreateContentTextChild,
    #[serde(rename = "read:content:list")]
    ReadContentList,
}

impl Capability {
    /// Every member of the vocabulary, in declaration order.
    pub const VOCABULARY: [Capability; 16] = [
        Capability::CreateUser,
        Capability::ReadUser,
        Capability::ReadUserSelf,
        Capability::ReadUserList,
        Capability::UpdateUser,
        Capability::ReadMigration,
        Capability::CreateMigration,
        Capability::ReadActivationToken,
        Capability::CreateSession,
        Capability::ReadSession,
        Capability::ReadContent,
        Capability::UpdateContent,
        Capability::CreateContent,
        Capability::CreateContentTextRoot,
        Capability::CreateContentTextChild,
        Capability::ReadContentList,
    ];

    /// The wire token for this capability.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::CreateUser => "create:user",
            Capability::ReadUser => "read:user",
            Capability::ReadUserSelf => "read:user:self",
            Capability::ReadUserList => "read:user:list",
            Capability::UpdateUser => "update:user",
            Capability::ReadMigration => "read:migration",
            Capability::CreateMigration => "create:migration",
            Capability::ReadActivationToken => "read:activation_token",
            Capability::CreateSession => "create:session",
            Capability::ReadSession => "read:session",
            Capability::ReadContent => "read:content",
            Capability::UpdateContent => "update:content",
            Capability::CreateContent => "create:content",
            Capability::CreateContentTextRoot => "create:content:text_root",
            Capability::CreateContentTextChild => "create:content:text_child",
            Capability::ReadContentList => "read:content:list",
        }
    }

    /// Look up a wire token. Returns `None` for anything outside the vocabulary.
    ///
    /// Matching is exact and case-sensitive.
    pub fn parse(token: &str) -> Option<Capability> {
        Self::VOCABULARY.into_iter().find(|c| c.as_str() == token)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability tokens granted to a principal.
///
/// Built by the authentication layer and never modified by WARDEN. Tokens
/// are held as plain strings: a principal may carry tokens this build does
/// not know, but those can never satisfy a check because every check
/// validates its own token against the vocabulary first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    inner: HashSet<String>,
}

impl CapabilitySet {
    /// Grant a token to this set.
    pub fn grant(&mut self, token: impl Into<String>) {
        self.inner.insert(token.into());
    }

    /// Return true if the set contains the given capability.
    pub fn has(&self, capability: Capability) -> bool {
        self.inner.contains(capability.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}
