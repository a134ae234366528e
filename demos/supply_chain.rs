//! Supply Chain Walkthrough
//!
//! Drives two batches through the pipeline and prints each role's view.
//!
//! Key concepts:
//! - Stage-gated transitions: any caller may take the next step
//! - Temperature frozen at pickup
//! - Role-scoped projections
//! - Checkpoint and restore
//!
//! Run with: cargo run --example supply_chain

use harvest_ledger::checkpoint::LedgerCheckpoint;
use harvest_ledger::projection::Role;
use harvest_ledger::{Identity, Ledger, LedgerConfig};

fn print_views(ledger: &Ledger) {
    for role in Role::ALL {
        let ids: Vec<_> = ledger
            .projection()
            .for_role(role)
            .iter()
            .map(|b| b.id)
            .collect();
        println!("  {:<12} {:?}", role.name(), ids);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = LedgerConfig::new().temperature_bounds(-25, 10);
    let ledger = Ledger::with_config(config.clone())?;

    let farmer = Identity::new("0xfa11");
    let manager = Identity::new("0x3a9e");
    let transporter = Identity::new("0x77c0");

    let wheat = ledger.create_batch_with_temperature(&farmer, "Wheat", 100, 4)?;
    let milk = ledger.create_batch_with_temperature(&farmer, "Milk", 40, 2)?;

    ledger.approve_batch(&manager, wheat)?;
    ledger.update_temperature(&manager, wheat, 3)?;
    ledger.pick_batch(&transporter, wheat)?;

    println!("Views after wheat pickup:");
    print_views(&ledger);

    match ledger.update_temperature(&manager, wheat, 5) {
        Ok(()) => println!("unexpected: temperature changed after pickup"),
        Err(err) => println!("Rejected as expected: {err}"),
    }
    if let Err(err) = ledger.update_temperature(&manager, milk, 30) {
        println!("Rejected as expected: {err}");
    }

    let json = ledger.checkpoint().to_json()?;
    let restored = Ledger::restore(LedgerCheckpoint::from_json(&json)?, config)?;
    restored.receive_batch(&Identity::new("0xd157"), wheat)?;
    restored.confirm_delivery(&Identity::new("0xc0de"), wheat)?;

    println!();
    println!("Views of restored ledger after delivery:");
    print_views(&restored);

    println!();
    println!("History of batch {wheat}:");
    let history = restored.history(wheat)?;
    for record in history.records() {
        println!(
            "  {:<18} {} -> {} by {}",
            record.kind, record.from, record.to, record.actor
        );
    }
    if let Some(elapsed) = history.duration() {
        println!("  took {elapsed:?} from first to last step");
    }
    let by_manager: Vec<_> = history.by_actor(&manager).map(|r| r.kind).collect();
    println!("  steps by manager {manager}: {by_manager:?}");

    Ok(())
}
