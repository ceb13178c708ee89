//! Sample registration scenario.

use super::RegistryArgs;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use landchain_registry::{Registry, RegistryResponse};
use serde_json::json;

#[derive(Args)]
pub struct DemoArgs {
    #[command(flatten)]
    registry: RegistryArgs,
}

pub fn run(args: DemoArgs) -> Result<()> {
    println!("{}", "Running land registry demo...".bold().cyan());
    println!();

    let mut registry = args.registry.open()?;

    step("Registering new land");
    expect_ok(registry.register(
        "LAND001",
        "John Doe",
        "123 Main Street, New York, NY 10001",
        json!({
            "area": 2500,
            "location": "Downtown Manhattan",
            "land_type": "commercial",
            "survey_number": "SY-2024-001",
            "description": "Prime commercial property in downtown area"
        }),
    ))?;

    step("Registering second land");
    expect_ok(registry.register(
        "LAND002",
        "Jane Smith",
        "456 Oak Avenue, Los Angeles, CA 90210",
        json!({
            "area": 1800,
            "location": "Beverly Hills",
            "land_type": "residential",
            "survey_number": "SY-2024-002",
            "description": "Luxury residential property"
        }),
    ))?;

    step("Transferring land ownership");
    expect_ok(registry.transfer(
        "LAND001",
        "123 Main Street, New York, NY 10001",
        "789 Business Blvd, Chicago, IL 60601",
        "ABC Corporation",
        json!({
            "transfer_reason": "sale",
            "transfer_amount": "1500000",
            "notes": "Commercial property sale to corporation"
        }),
    ))?;

    step("Registering LAND001 again (should fail)");
    expect_rejected(registry.register("LAND001", "Someone Else", "1 Nowhere Rd", json!({})))?;

    step("Transferring from a non-owner (should fail)");
    expect_rejected(registry.transfer(
        "LAND002",
        "999 Fake Street",
        "1 Nowhere Rd",
        "Mallory",
        json!({}),
    ))?;

    print_land_info(&registry, "LAND001");
    print_summary(&registry);
    print_stats(&registry)?;

    println!();
    println!("{}", "Demo completed successfully!".green().bold());
    Ok(())
}

fn step(title: &str) {
    println!();
    println!("{}", title.bold());
}

fn expect_ok(response: RegistryResponse) -> Result<()> {
    if !response.ok {
        bail!("unexpected failure: {}", response.message);
    }
    println!("{}  {}", "✓".green().bold(), response.message);
    if let Some(digest) = &response.block_digest {
        println!("    Block: {}", digest.short().bright_yellow());
    }
    if let Some(err) = &response.persistence_error {
        println!("    {} snapshot not saved: {}", "!".yellow().bold(), err);
    }
    Ok(())
}

fn expect_rejected(response: RegistryResponse) -> Result<()> {
    if response.ok {
        bail!("operation should have been rejected: {}", response.message);
    }
    println!("{}  Rejected: {}", "✓".green().bold(), response.message);
    Ok(())
}

fn print_land_info(registry: &Registry, land_id: &str) {
    step(&format!("Land information for {}", land_id));
    let Ok(info) = registry.try_land_info(land_id) else {
        println!("  {} is not registered", land_id);
        return;
    };

    println!("  Current Owner: {}", info.current_owner.bright_cyan());
    println!(
        "  Transactions:  {}",
        info.transaction_count.to_string().bright_cyan()
    );
    for record in &info.history {
        println!(
            "    {} {:?} -> {} {}",
            format!("#{}", record.block_index).bright_black(),
            record.event.kind,
            record.event.to_id,
            record.block_digest.short().bright_yellow()
        );
    }
}

fn print_summary(registry: &Registry) {
    step("All registered lands");
    for land in registry.summary_all() {
        println!(
            "  {} {} {}",
            land.land_id.bright_cyan(),
            land.current_owner,
            format!("({} txs)", land.transaction_count).bright_black()
        );
    }
}

fn print_stats(registry: &Registry) -> Result<()> {
    step("Blockchain statistics");
    let stats = registry.stats();
    println!("  Blocks:       {}", stats.total_blocks.to_string().bright_cyan());
    println!(
        "  Transactions: {}",
        stats.total_transactions.to_string().bright_cyan()
    );
    println!(
        "  Registered:   {}",
        stats.total_lands_registered.to_string().bright_cyan()
    );
    println!("  Transfers:    {}", stats.total_transfers.to_string().bright_cyan());

    if !stats.blockchain_valid {
        bail!("blockchain integrity check failed");
    }
    println!("  Integrity:    {}", "valid".green().bold());
    Ok(())
}
