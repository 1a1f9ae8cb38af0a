//! # warden-core
//!
//! Capability decisions and payload projection for the WARDEN authorization
//! layer.
//!
//! This crate provides:
//! - `guard`      — precondition checks (vocabulary, principal, payload)
//! - `policy`     — the per-capability lookup table
//! - `decision`   — `can(principal, capability, resource?)`
//! - `projection` — `filter_input` / `filter_output`
//! - `traits`     — seams to the output validator and the request context
//! - `Authorizer` — the three operations bundled for request handlers
//!
//! Every operation is pure: nothing here holds mutable state, blocks, or
//! performs I/O.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_core::{decision::can, projection::filter_input};
//!
//! if can(&principal, "update:content", Some(&resource))? {
//!     let patch = filter_input(&principal, "update:content", &body)?;
//! }
//! ```

pub mod authorizer;
pub mod decision;
pub mod guard;
pub mod policy;
pub mod projection;
pub mod traits;

pub use authorizer::Authorizer;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use warden_contracts::{
        capability::Capability,
        error::{WardenError, WardenResult},
        principal::Principal,
    };

    use crate::{
        policy::policy_for,
        projection::{filter_input, filter_output},
        traits::OutputValidator,
        Authorizer,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Accepts any object carrying a `slug`; rejects everything else.
    struct SlugValidator;

    impl OutputValidator for SlugValidator {
        fn validate(&self, _capability: Capability, value: &Value) -> WardenResult<Value> {
            if value.get("slug").is_some() {
                Ok(value.clone())
            } else {
                Err(WardenError::SchemaValidation {
                    reason: "missing slug".to_string(),
                })
            }
        }
    }

    fn keys(value: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("projection result is an object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    fn session(user_id: &str) -> Value {
        json!({
            "id": "s1",
            "user_id": user_id,
            "token": "t",
            "expires_at": "2026-01-01T00:00:00Z",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
        })
    }

    fn user(id: &str) -> Value {
        json!({
            "id": id,
            "username": format!("name-{id}"),
            "email": format!("{id}@example.com"),
            "password": "hash",
            "features": ["read:user"],
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z",
        })
    }

    // ── filter_input ──────────────────────────────────────────────────────────

    #[test]
    fn input_drops_fields_outside_the_allow_list() {
        let principal = Principal::new("u1", ["create:content:text_root"]);
        let input = json!({"slug": "a", "title": "b", "body": "c", "extra": "drop-me"});

        let filtered = filter_input(&principal, "create:content:text_root", &input).unwrap();

        assert_eq!(filtered, json!({"slug": "a", "title": "b", "body": "c"}));
    }

    #[test]
    fn input_is_empty_when_capability_not_held() {
        let principal = Principal::new("u1", ["read:user"]);
        let input = json!({"username": "x", "email": "x@example.com", "password": "p"});

        let filtered = filter_input(&principal, "create:user", &input).unwrap();

        assert_eq!(filtered, json!({}));
    }

    #[test]
    fn input_renames_token_id() {
        let principal = Principal::anonymous(["read:activation_token"]);
        let filtered =
            filter_input(&principal, "read:activation_token", &json!({"token_id": "abc", "id": "x"})).unwrap();
        assert_eq!(filtered, json!({"tokenId": "abc"}));
    }

    #[test]
    fn input_keeps_explicit_nulls_but_not_absent_fields() {
        let principal = Principal::new("u1", ["create:content:text_child"]);
        let input = json!({"parent_id": "c0", "body": "text", "source_url": null});

        let filtered = filter_input(&principal, "create:content:text_child", &input).unwrap();

        assert_eq!(filtered, json!({"parent_id": "c0", "body": "text", "source_url": null}));
    }

    #[test]
    fn input_for_capability_without_input_rule_is_empty() {
        let principal = Principal::new("u1", ["read:migration", "create:content"]);
        for token in ["read:migration", "create:content"] {
            let filtered = filter_input(&principal, token, &json!({"anything": 1})).unwrap();
            assert_eq!(filtered, json!({}), "{token}");
        }
    }

    #[test]
    fn update_content_input_is_gated_on_membership_only() {
        // Ownership is a decision concern; the projector checks plain membership.
        let principal = Principal::new("u1", ["update:content"]);
        let filtered = filter_input(&principal, "update:content", &json!({"title": "t", "owner_id": "u2"})).unwrap();
        assert_eq!(filtered, json!({"title": "t"}));
    }

    #[test]
    fn input_result_keys_are_within_allow_list_and_defined_input() {
        let inputs = [
            json!({}),
            json!({"email": "e"}),
            json!({"email": "e", "password": "p", "username": "u", "is_admin": true}),
            json!({"slug": "s", "title": null, "parent_id": "p", "owner_id": "o", "status": "draft"}),
            json!({"token_id": "t", "tokenId": "spoofed"}),
            json!([1, 2, 3]),
            json!("string input"),
            json!(42),
        ];

        for capability in Capability::VOCABULARY {
            let principal = Principal::new("u1", [capability.as_str()]);
            let allowed: Vec<&str> = policy_for(capability)
                .input
                .unwrap_or(&[])
                .iter()
                .map(|f| f.target)
                .collect();

            for input in &inputs {
                let filtered = filter_input(&principal, capability.as_str(), input).unwrap();
                for key in keys(&filtered) {
                    assert!(allowed.contains(&key), "{capability}: key {key} not allow-listed");
                    let source = policy_for(capability)
                        .input
                        .unwrap_or(&[])
                        .iter()
                        .find(|f| f.target == key)
                        .map(|f| f.source)
                        .unwrap();
                    assert!(input.get(source).is_some(), "{capability}: key {key} absent from input");
                }
            }
        }
    }

    #[test]
    fn input_rejects_null_payload_and_unknown_token() {
        let principal = Principal::new("u1", ["create:user"]);
        assert!(filter_input(&principal, "create:user", &Value::Null)
            .unwrap_err()
            .is_contract_violation());
        assert!(filter_input(&principal, "create:admin", &json!({}))
            .unwrap_err()
            .is_contract_violation());
    }

    // ── filter_output: sessions ───────────────────────────────────────────────

    #[test]
    fn read_session_without_capability_is_empty_despite_identity_match() {
        let principal = Principal::new("u1", Vec::<String>::new());
        let filtered = filter_output(&principal, "read:session", &session("u1"), &SlugValidator).unwrap();
        assert_eq!(filtered, json!({}));
    }

    #[test]
    fn read_session_for_owner_hides_token() {
        let principal = Principal::new("u1", ["read:session"]);
        let filtered = filter_output(&principal, "read:session", &session("u1"), &SlugValidator).unwrap();
        assert_eq!(keys(&filtered), vec!["created_at", "expires_at", "id", "updated_at"]);
    }

    #[test]
    fn create_session_for_owner_includes_token() {
        let principal = Principal::new("u1", ["create:session"]);
        let filtered = filter_output(&principal, "create:session", &session("u1"), &SlugValidator).unwrap();
        assert_eq!(filtered["token"], json!("t"));
        assert!(filtered.get("user_id").is_none());
    }

    #[test]
    fn session_of_another_principal_is_empty() {
        let principal = Principal::new("u1", ["read:session", "create:session"]);
        for token in ["read:session", "create:session"] {
            let filtered = filter_output(&principal, token, &session("u2"), &SlugValidator).unwrap();
            assert_eq!(filtered, json!({}), "{token}");
        }
    }

    #[test]
    fn session_identity_check_needs_both_ids() {
        let anonymous = Principal::anonymous(["create:session"]);
        let mut no_owner = session("u1");
        no_owner.as_object_mut().unwrap().remove("user_id");

        let a = filter_output(&anonymous, "create:session", &session("u1"), &SlugValidator).unwrap();
        let b = filter_output(&Principal::new("u1", ["create:session"]), "create:session", &no_owner, &SlugValidator)
            .unwrap();
        assert_eq!(a, json!({}));
        assert_eq!(b, json!({}));
    }

    #[test]
    fn session_identity_check_compares_numeric_ids() {
        let principal = Principal::new(42u64, ["read:session"]);
        let mut owned = session("ignored");
        owned["user_id"] = json!(42);

        let filtered = filter_output(&principal, "read:session", &owned, &SlugValidator).unwrap();
        assert_eq!(filtered["id"], json!("s1"));

        owned["user_id"] = json!("42");
        let filtered = filter_output(&principal, "read:session", &owned, &SlugValidator).unwrap();
        assert_eq!(filtered, json!({}));
    }

    // ── filter_output: users ──────────────────────────────────────────────────

    #[test]
    fn read_user_self_matches_numeric_id() {
        let principal = Principal::new(7u64, Vec::<String>::new());
        let mut me = user("ignored");
        me["id"] = json!(7);
        let filtered = filter_output(&principal, "read:user:self", &me, &SlugValidator).unwrap();
        assert_eq!(filtered["id"], json!(7));
        assert!(filtered.get("email").is_some());
    }

    #[test]
    fn read_user_is_public_profile_without_email() {
        let principal = Principal::new("someone-else", Vec::<String>::new());
        let filtered = filter_output(&principal, "read:user", &user("u1"), &SlugValidator).unwrap();
        assert_eq!(keys(&filtered), vec!["created_at", "features", "id", "updated_at", "username"]);
    }

    #[test]
    fn read_user_self_adds_email_for_the_same_principal() {
        let principal = Principal::new("u1", ["read:user:self"]);
        let filtered = filter_output(&principal, "read:user:self", &user("u1"), &SlugValidator).unwrap();
        assert_eq!(
            keys(&filtered),
            vec!["created_at", "email", "features", "id", "updated_at", "username"]
        );

        let other = filter_output(&principal, "read:user:self", &user("u2"), &SlugValidator).unwrap();
        assert_eq!(other, json!({}));
    }

    #[test]
    fn read_user_list_preserves_length_order_and_shape() {
        let principal = Principal::new("u1", ["read:user:list"]);
        for n in [0usize, 1, 5] {
            let users: Vec<Value> = (0..n).map(|i| user(&format!("u{i}"))).collect();
            let filtered = filter_output(&principal, "read:user:list", &Value::Array(users), &SlugValidator).unwrap();
            let items = filtered.as_array().unwrap();

            assert_eq!(items.len(), n);
            for (i, item) in items.iter().enumerate() {
                assert_eq!(item["id"], json!(format!("u{i}")));
                assert_eq!(keys(item), vec!["created_at", "features", "id", "updated_at", "username"]);
            }
        }
    }

    #[test]
    fn list_rule_on_non_list_output_is_contract_violation() {
        let principal = Principal::new("u1", ["read:user:list"]);
        let err = filter_output(&principal, "read:user:list", &user("u1"), &SlugValidator).unwrap_err();
        assert!(err.is_contract_violation());
    }

    // ── filter_output: activation tokens and content ──────────────────────────

    #[test]
    fn read_activation_token_output() {
        let principal = Principal::anonymous(Vec::<String>::new());
        let token = json!({"id": "t1", "user_id": "u1", "used": false, "expires_at": "x"});
        let filtered = filter_output(&principal, "read:activation_token", &token, &SlugValidator).unwrap();
        assert_eq!(filtered, json!({"id": "t1", "used": false, "expires_at": "x"}));
    }

    #[test]
    fn read_content_passes_through_validator() {
        let principal = Principal::anonymous(Vec::<String>::new());
        let content = json!({"id": "c1", "slug": "hello", "internal": 1});

        let filtered = filter_output(&principal, "read:content", &content, &SlugValidator).unwrap();
        assert_eq!(filtered, content);

        match filter_output(&principal, "read:content", &json!({"id": "c1"}), &SlugValidator) {
            Err(WardenError::SchemaValidation { .. }) => {}
            other => panic!("expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn read_content_list_validates_every_element() {
        let principal = Principal::anonymous(Vec::<String>::new());
        let good = json!([{"slug": "a"}, {"slug": "b"}]);
        assert_eq!(
            filter_output(&principal, "read:content:list", &good, &SlugValidator).unwrap(),
            good
        );

        let bad = json!([{"slug": "a"}, {"title": "no slug"}]);
        assert!(filter_output(&principal, "read:content:list", &bad, &SlugValidator).is_err());
    }

    #[test]
    fn output_for_capability_without_output_rule_is_empty() {
        let principal = Principal::new("u1", ["update:user"]);
        let filtered = filter_output(&principal, "update:user", &user("u1"), &SlugValidator).unwrap();
        assert_eq!(filtered, json!({}));
    }

    #[test]
    fn output_rejects_null_payload() {
        let principal = Principal::new("u1", ["read:user"]);
        assert!(filter_output(&principal, "read:user", &Value::Null, &SlugValidator)
            .unwrap_err()
            .is_contract_violation());
    }

    // ── Contract violations across entry points ───────────────────────────────

    #[test]
    fn unknown_tokens_are_contract_violations_everywhere() {
        let principal = Principal::new("u1", ["update:self-profile", "read:users"]);
        let authorizer = Authorizer::new(Box::new(SlugValidator));

        for token in ["update:self-profile", "read:users", "", "create:session "] {
            let errors = [
                authorizer.can(&principal, token, None).unwrap_err(),
                authorizer.filter_input(&principal, token, &json!({})).unwrap_err(),
                authorizer.filter_output(&principal, token, &json!({})).unwrap_err(),
            ];
            for err in errors {
                assert!(err.is_contract_violation(), "{token:?}: got {:?}", err);
            }
        }
    }

    // ── Authorizer ────────────────────────────────────────────────────────────

    #[test]
    fn authorizer_runs_a_handler_flow() {
        let authorizer = Authorizer::new(Box::new(SlugValidator));
        let principal = Principal::new("u1", ["update:user", "read:user:self"]);

        assert!(authorizer
            .can(&principal, "update:user", Some(&warden_contracts::principal::Resource::with_id("u1")))
            .unwrap());

        let patch = authorizer
            .filter_input(&principal, "update:user", &json!({"email": "new@example.com", "features": ["x"]}))
            .unwrap();
        assert_eq!(patch, json!({"email": "new@example.com"}));

        let shown = authorizer.filter_output(&principal, "read:user:self", &user("u1")).unwrap();
        assert_eq!(shown["email"], json!("u1@example.com"));
        assert!(shown.get("password").is_none());
    }
}
