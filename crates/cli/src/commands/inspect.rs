//! Inspect a saved snapshot.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use landchain_consensus::ChainValidator;
use landchain_storage::SnapshotStore;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// Snapshot file to read
    #[arg(default_value = "blockchain_data.json")]
    snapshot: PathBuf,

    /// Show every event of every block
    #[arg(short, long)]
    events: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let store = SnapshotStore::new(&args.snapshot);
    let Some(snapshot) = store
        .load()
        .with_context(|| format!("Failed to read snapshot: {}", args.snapshot.display()))?
    else {
        bail!("Snapshot not found: {}", args.snapshot.display());
    };

    println!();
    println!("{}", "Snapshot:".bold().cyan());
    println!();
    println!("  Blocks:     {}", snapshot.len().to_string().bright_cyan());
    println!(
        "  Difficulty: {}",
        snapshot.difficulty.to_string().bright_cyan()
    );
    println!(
        "  Pending:    {}",
        snapshot.pending_transactions.len().to_string().bright_cyan()
    );
    println!();

    for block in &snapshot.chain {
        println!(
            "  {} {} {} {}",
            format!("#{}", block.index).bright_black(),
            block.digest.short().bright_yellow(),
            format!("nonce {}", block.nonce).bright_black(),
            format!("({} events)", block.event_count()).bright_black()
        );
        if args.events {
            for event in &block.events {
                println!(
                    "      {:?} {} -> {}",
                    event.kind,
                    event.asset_id.as_deref().unwrap_or("-"),
                    event.to_id
                );
            }
        }
    }

    println!();
    match ChainValidator::validate_chain(&snapshot.chain) {
        Ok(()) => println!("  Integrity: {}", "valid".green().bold()),
        Err(e) => println!("  Integrity: {} ({})", "INVALID".red().bold(), e),
    }
    println!();

    Ok(())
}
