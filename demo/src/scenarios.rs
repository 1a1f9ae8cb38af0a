//! Walkthrough scenarios for `demo run-all`.
//!
//! Each scenario runs real WARDEN components against fixture data and prints
//! what a request handler would see.

use serde_json::{json, Value};
use tracing::info;

use warden_contracts::{
    error::WardenResult,
    principal::{Principal, Resource},
};
use warden_core::Authorizer;
use warden_routes::RouteTable;
use warden_verify::SchemaValidator;

use crate::BUNDLED_ROUTES;

fn show(label: &str, value: &Value) {
    println!("  {label}: {value}");
}

/// Ownership overrides membership for `update:user` and `update:content`.
fn ownership(authorizer: &Authorizer) -> WardenResult<()> {
    println!("[1] Ownership overrides");

    let editor = Principal::new("u1", ["update:user", "update:content"]);
    let someone_else = Resource::with_id("u2");
    let own_post = Resource {
        id: Some("c1".into()),
        owner_id: Some("u1".into()),
    };

    println!(
        "  update:user on u2 (capability held, not owner) -> {}",
        authorizer.can(&editor, "update:user", Some(&someone_else))?
    );
    println!(
        "  update:user without a resource                  -> {}",
        authorizer.can(&editor, "update:user", None)?
    );
    println!(
        "  update:content on own post                      -> {}",
        authorizer.can(&editor, "update:content", Some(&own_post))?
    );
    println!();
    Ok(())
}

/// Over-posting: fields outside the allow-list never reach the domain layer.
fn input_projection(authorizer: &Authorizer) -> WardenResult<()> {
    println!("[2] Input projection");

    let author = Principal::new("u1", ["create:content:text_root"]);
    let body = json!({
        "slug": "a",
        "title": "b",
        "body": "c",
        "owner_id": "u9",
        "extra": "drop-me"
    });

    show("raw", &body);
    show("accepted", &authorizer.filter_input(&author, "create:content:text_root", &body)?);

    let visitor = Principal::anonymous(["create:session"]);
    show(
        "create:user by a visitor without the capability",
        &authorizer.filter_input(&visitor, "create:user", &json!({"username": "x"}))?,
    );
    println!();
    Ok(())
}

/// Over-exposure: outputs are reduced per capability and identity.
fn output_projection(authorizer: &Authorizer) -> WardenResult<()> {
    println!("[3] Output projection");

    let session = json!({
        "id": "s1",
        "user_id": "u1",
        "token": "t",
        "expires_at": "2026-01-31T00:00:00Z",
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    });
    let holder = Principal::new("u1", ["read:session"]);
    let no_caps = Principal::new("u1", Vec::<String>::new());

    show("read:session by owner", &authorizer.filter_output(&holder, "read:session", &session)?);
    show(
        "read:session without capability",
        &authorizer.filter_output(&no_caps, "read:session", &session)?,
    );

    let users = json!([
        {"id": "u1", "username": "alice", "email": "a@example.com", "password": "h", "features": [], "created_at": "x", "updated_at": "y"},
        {"id": "u2", "username": "bob", "email": "b@example.com", "password": "h", "features": [], "created_at": "x", "updated_at": "y"}
    ]);
    show("read:user:list", &authorizer.filter_output(&no_caps, "read:user:list", &users)?);

    let content = json!({
        "id": "c1",
        "owner_id": "u1",
        "slug": "hello",
        "title": "Hello",
        "body": "World",
        "status": "published"
    });
    show("read:content", &authorizer.filter_output(&no_caps, "read:content", &content)?);
    println!();
    Ok(())
}

/// Route gating raises the user-facing denial.
fn route_gating() -> WardenResult<()> {
    println!("[4] Route gating");

    let routes = RouteTable::from_toml_str(BUNDLED_ROUTES)?;
    let reader = Principal::new("u1", ["read:content"]);

    match routes.check("POST", "/api/v1/contents", &reader) {
        Ok(()) => println!("  POST /api/v1/contents -> admitted"),
        Err(e) => println!("  POST /api/v1/contents -> {e}"),
    }
    match routes.check("GET", "/api/v1/contents/hello", &reader) {
        Ok(()) => println!("  GET /api/v1/contents/hello -> admitted"),
        Err(e) => println!("  GET /api/v1/contents/hello -> {e}"),
    }
    println!();
    Ok(())
}

/// Malformed invocations are contract violations, never denials.
fn contract_violations(authorizer: &Authorizer) -> WardenResult<()> {
    println!("[5] Contract violations");

    let principal = Principal::new("u1", ["update:self-profile"]);
    if let Err(e) = authorizer.can(&principal, "update:self-profile", None) {
        println!("  {e}");
    }
    if let Err(e) = authorizer.filter_input(&principal, "create:user", &Value::Null) {
        println!("  {e}");
    }
    println!();
    Ok(())
}

pub fn run_all() -> WardenResult<()> {
    info!("running walkthrough scenarios");
    let authorizer = Authorizer::new(Box::new(SchemaValidator::with_defaults()?));

    ownership(&authorizer)?;
    input_projection(&authorizer)?;
    output_projection(&authorizer)?;
    route_gating()?;
    contract_violations(&authorizer)?;
    Ok(())
}
