//! WARDEN — Demo CLI
//!
//! Runs the walkthrough scenarios, or evaluates a single decision or
//! projection given principals and payloads as JSON strings.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- can --principal '{"id":"u1","capabilities":["update:user"]}' \
//!       --capability update:user --resource '{"id":"u2"}'
//!   cargo run -p demo -- filter-input --principal '...' --capability create:user --input '{...}'
//!   cargo run -p demo -- route --method POST --path /api/v1/contents --principal '...'
//!   cargo run -p demo -- policy

mod scenarios;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use warden_contracts::{
    error::{WardenError, WardenResult},
    principal::{Principal, Resource},
};
use warden_core::{guard, Authorizer};
use warden_routes::RouteTable;
use warden_verify::SchemaValidator;

/// Route bindings shipped with the workspace.
pub(crate) const BUNDLED_ROUTES: &str = include_str!("../../config/routes.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// WARDEN — capability checks and payload projection.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "WARDEN authorization layer demo",
    long_about = "Evaluates WARDEN capability decisions, input/output projection,\n\
                  and route gating against JSON fixtures."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every walkthrough scenario in sequence.
    RunAll,
    /// Decide whether a principal may act under a capability.
    Can {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        capability: String,
        /// Optional resource object with `id` / `owner_id`.
        #[arg(long)]
        resource: Option<String>,
    },
    /// Reduce an input payload to the writable fields.
    FilterInput {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        capability: String,
        #[arg(long)]
        input: String,
    },
    /// Reduce an output payload to the readable fields.
    FilterOutput {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        capability: String,
        #[arg(long)]
        output: String,
    },
    /// Gate a request against a route table.
    Route {
        /// TOML route file; defaults to the bundled config/routes.toml.
        #[arg(long)]
        routes: Option<PathBuf>,
        #[arg(long)]
        method: String,
        #[arg(long)]
        path: String,
        #[arg(long)]
        principal: String,
    },
    /// Print the capability policy table as JSON.
    Policy,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> WardenResult<()> {
    let authorizer = || -> WardenResult<Authorizer> {
        Ok(Authorizer::new(Box::new(SchemaValidator::with_defaults()?)))
    };

    match command {
        Command::RunAll => scenarios::run_all(),

        Command::Can { principal, capability, resource } => {
            let principal = parse_principal(&principal)?;
            let resource = resource.as_deref().map(parse_resource).transpose()?;
            let allowed = authorizer()?.can(&principal, &capability, resource.as_ref())?;
            println!("{allowed}");
            Ok(())
        }

        Command::FilterInput { principal, capability, input } => {
            let principal = parse_principal(&principal)?;
            let filtered = authorizer()?.filter_input(&principal, &capability, &parse_json("input", &input)?)?;
            println!("{filtered}");
            Ok(())
        }

        Command::FilterOutput { principal, capability, output } => {
            let principal = parse_principal(&principal)?;
            let filtered = authorizer()?.filter_output(&principal, &capability, &parse_json("output", &output)?)?;
            println!("{filtered}");
            Ok(())
        }

        Command::Route { routes, method, path, principal } => {
            let table = match routes {
                Some(file) => RouteTable::from_file(&file)?,
                None => RouteTable::from_toml_str(BUNDLED_ROUTES)?,
            };
            if table.is_empty() {
                tracing::warn!("route table has no bindings; every request is admitted");
            }
            let principal = parse_principal(&principal)?;
            table.check(&method, &path, &principal)?;
            println!("admitted");
            Ok(())
        }

        Command::Policy => {
            let table = serde_json::to_string_pretty(&warden_core::policy::POLICY_TABLE).map_err(|e| {
                WardenError::ConfigError {
                    reason: format!("policy table could not be serialized: {e}"),
                }
            })?;
            println!("{table}");
            Ok(())
        }
    }
}

// ── Argument parsing ──────────────────────────────────────────────────────────

fn parse_json(what: &str, raw: &str) -> WardenResult<Value> {
    serde_json::from_str(raw).map_err(|e| {
        WardenError::contract_violation_with(format!("{what} is not valid JSON: {e}"), raw)
    })
}

fn parse_principal(raw: &str) -> WardenResult<Principal> {
    guard::principal_from_value(&parse_json("principal", raw)?)
}

fn parse_resource(raw: &str) -> WardenResult<Resource> {
    serde_json::from_value(parse_json("resource", raw)?).map_err(|e| {
        WardenError::contract_violation_with(format!("resource could not be decoded: {e}"), raw)
    })
}
