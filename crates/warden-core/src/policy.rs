//! The capability policy table.
//!
//! One entry per vocabulary member. Decision and projection code look rules
//! up here instead of branching on individual capabilities, so a new
//! owner-scoped capability or allow-list only touches this file.

use warden_contracts::{
    capability::Capability,
    policy::{CapabilityPolicy, FieldMapping, OutputRule, OwnerField, OwnershipRule},
};

// ── Input allow-lists ─────────────────────────────────────────────────────────

const SESSION_INPUT: &[FieldMapping] = &[FieldMapping::same("email"), FieldMapping::same("password")];

const USER_INPUT: &[FieldMapping] = &[
    FieldMapping::same("username"),
    FieldMapping::same("email"),
    FieldMapping::same("password"),
];

const ACTIVATION_TOKEN_INPUT: &[FieldMapping] = &[FieldMapping::renamed("token_id", "tokenId")];

const CONTENT_ROOT_INPUT: &[FieldMapping] = &[
    FieldMapping::same("slug"),
    FieldMapping::same("title"),
    FieldMapping::same("body"),
    FieldMapping::same("status"),
    FieldMapping::same("source_url"),
];

const CONTENT_CHILD_INPUT: &[FieldMapping] = &[
    FieldMapping::same("parent_id"),
    FieldMapping::same("slug"),
    FieldMapping::same("title"),
    FieldMapping::same("body"),
    FieldMapping::same("status"),
    FieldMapping::same("source_url"),
];

// ── Output allow-lists ────────────────────────────────────────────────────────

const SESSION_OUTPUT: &[FieldMapping] = &[
    FieldMapping::same("id"),
    FieldMapping::same("expires_at"),
    FieldMapping::same("created_at"),
    FieldMapping::same("updated_at"),
];

// The session token is only ever returned by the call that created it.
const NEW_SESSION_OUTPUT: &[FieldMapping] = &[
    FieldMapping::same("id"),
    FieldMapping::same("token"),
    FieldMapping::same("expires_at"),
    FieldMapping::same("created_at"),
    FieldMapping::same("updated_at"),
];

const PUBLIC_USER_OUTPUT: &[FieldMapping] = &[
    FieldMapping::same("id"),
    FieldMapping::same("username"),
    FieldMapping::same("features"),
    FieldMapping::same("created_at"),
    FieldMapping::same("updated_at"),
];

const SELF_USER_OUTPUT: &[FieldMapping] = &[
    FieldMapping::same("id"),
    FieldMapping::same("username"),
    FieldMapping::same("email"),
    FieldMapping::same("features"),
    FieldMapping::same("created_at"),
    FieldMapping::same("updated_at"),
];

const ACTIVATION_TOKEN_OUTPUT: &[FieldMapping] = &[
    FieldMapping::same("id"),
    FieldMapping::same("used"),
    FieldMapping::same("expires_at"),
    FieldMapping::same("created_at"),
    FieldMapping::same("updated_at"),
];

// ── Table ─────────────────────────────────────────────────────────────────────

const fn plain(capability: Capability) -> CapabilityPolicy {
    CapabilityPolicy {
        capability,
        ownership: OwnershipRule::Plain,
        input: None,
        output: None,
    }
}

/// Policy entries for the whole vocabulary, in vocabulary order.
pub const POLICY_TABLE: [CapabilityPolicy; 16] = [
    CapabilityPolicy {
        input: Some(USER_INPUT),
        ..plain(Capability::CreateUser)
    },
    CapabilityPolicy {
        output: Some(OutputRule::Fields {
            fields: PUBLIC_USER_OUTPUT,
            identity: None,
            gated: false,
        }),
        ..plain(Capability::ReadUser)
    },
    CapabilityPolicy {
        output: Some(OutputRule::Fields {
            fields: SELF_USER_OUTPUT,
            identity: Some("id"),
            gated: false,
        }),
        ..plain(Capability::ReadUserSelf)
    },
    CapabilityPolicy {
        output: Some(OutputRule::List {
            fields: PUBLIC_USER_OUTPUT,
        }),
        ..plain(Capability::ReadUserList)
    },
    CapabilityPolicy {
        ownership: OwnershipRule::OwnerMatch {
            field: OwnerField::Id,
        },
        input: Some(USER_INPUT),
        ..plain(Capability::UpdateUser)
    },
    plain(Capability::ReadMigration),
    plain(Capability::CreateMigration),
    CapabilityPolicy {
        input: Some(ACTIVATION_TOKEN_INPUT),
        output: Some(OutputRule::Fields {
            fields: ACTIVATION_TOKEN_OUTPUT,
            identity: None,
            gated: false,
        }),
        ..plain(Capability::ReadActivationToken)
    },
    CapabilityPolicy {
        input: Some(SESSION_INPUT),
        output: Some(OutputRule::Fields {
            fields: NEW_SESSION_OUTPUT,
            identity: Some("user_id"),
            gated: true,
        }),
        ..plain(Capability::CreateSession)
    },
    CapabilityPolicy {
        output: Some(OutputRule::Fields {
            fields: SESSION_OUTPUT,
            identity: Some("user_id"),
            gated: true,
        }),
        ..plain(Capability::ReadSession)
    },
    CapabilityPolicy {
        output: Some(OutputRule::Validated { list: false }),
        ..plain(Capability::ReadContent)
    },
    CapabilityPolicy {
        ownership: OwnershipRule::OwnerMatch {
            field: OwnerField::OwnerId,
        },
        input: Some(CONTENT_CHILD_INPUT),
        ..plain(Capability::UpdateContent)
    },
    plain(Capability::CreateContent),
    CapabilityPolicy {
        input: Some(CONTENT_ROOT_INPUT),
        ..plain(Capability::CreateContentTextRoot)
    },
    CapabilityPolicy {
        input: Some(CONTENT_CHILD_INPUT),
        ..plain(Capability::CreateContentTextChild)
    },
    CapabilityPolicy {
        output: Some(OutputRule::Validated { list: true }),
        ..plain(Capability::ReadContentList)
    },
];

/// Return the policy entry for `capability`.
pub fn policy_for(capability: Capability) -> &'static CapabilityPolicy {
    // The table is in vocabulary order, so the enum discriminant indexes it.
    &POLICY_TABLE[capability as usize]
}
