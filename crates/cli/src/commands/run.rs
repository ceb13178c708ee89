//! Apply a batch of registry operations in one process.
//!
//! The ledger only lives as long as the process, so a sequence of
//! operations that should see each other must be submitted together.

use super::RegistryArgs;
use anyhow::{Context, Result};
use clap::Args;
use landchain_registry::Registry;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// JSON file holding an array of operations
    ops_file: PathBuf,

    #[command(flatten)]
    registry: RegistryArgs,
}

/// One registry operation, tagged by `op`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Operation {
    Register {
        land_id: String,
        owner_name: String,
        owner_address: String,
        #[serde(default)]
        land_details: Value,
    },
    Transfer {
        land_id: String,
        from_owner: String,
        to_owner: String,
        to_owner_name: String,
        #[serde(default)]
        transfer_details: Value,
    },
    Info {
        land_id: String,
    },
    History {
        land_id: String,
    },
    Balance {
        holder: String,
    },
    Summary,
    Stats,
    Verify,
}

pub fn run(args: RunArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.ops_file)
        .with_context(|| format!("Failed to read operations file: {}", args.ops_file.display()))?;
    let operations: Vec<Operation> =
        serde_json::from_str(&contents).context("Invalid operations file")?;

    let mut registry = args.registry.open()?;
    let results = operations
        .into_iter()
        .map(|op| apply(&mut registry, op))
        .collect::<Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn apply(registry: &mut Registry, op: Operation) -> Result<Value> {
    let value = match op {
        Operation::Register {
            land_id,
            owner_name,
            owner_address,
            land_details,
        } => serde_json::to_value(registry.register(
            &land_id,
            &owner_name,
            &owner_address,
            land_details,
        ))?,
        Operation::Transfer {
            land_id,
            from_owner,
            to_owner,
            to_owner_name,
            transfer_details,
        } => serde_json::to_value(registry.transfer(
            &land_id,
            &from_owner,
            &to_owner,
            &to_owner_name,
            transfer_details,
        ))?,
        Operation::Info { land_id } => serde_json::to_value(registry.land_info(&land_id))?,
        Operation::History { land_id } => serde_json::to_value(registry.history(&land_id))?,
        Operation::Balance { holder } => json!({
            "holder": holder,
            "balance": registry.balance(&holder),
        }),
        Operation::Summary => serde_json::to_value(registry.summary_all())?,
        Operation::Stats => serde_json::to_value(registry.stats())?,
        Operation::Verify => json!({ "valid": registry.verify() }),
    };
    Ok(value)
}
