//! Roster Sync Example
//!
//! This example demonstrates the optimistic sync core:
//! - Watching the local mirror (with a background refresh)
//! - Creating, updating, and deleting records optimistically
//! - Automatic rollback when the remote service fails
//!
//! Run with: cargo run -p roster_demo

use roster_remote::{MockRemoteService, RemoteError};
use roster_store::{LocalStore, MemoryStore, Record, RecordFields};
use roster_sync::SyncRepository;
use std::sync::Arc;
use std::time::Duration;

fn print_rows(label: &str, rows: &[Record]) {
    println!("{label}:");
    if rows.is_empty() {
        println!("  (empty)");
    }
    for row in rows {
        println!(
            "  #{:<4} {:<8} age {:<3} salary {:<7} [{:?}]",
            row.id.unwrap_or(0),
            row.name,
            row.age,
            row.salary,
            row.sync_state,
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roster_sync=debug")),
        )
        .init();

    println!("Roster Sync Example");
    println!("===================\n");

    // A scripted remote standing in for the real service. Unscripted
    // it behaves like a well-behaved server.
    let remote = Arc::new(MockRemoteService::new());
    let store = Arc::new(MemoryStore::new());
    let repo = SyncRepository::new(Arc::clone(&store), Arc::clone(&remote));

    // The read path returns immediately; the refresh runs behind it.
    let rx = repo.watch();
    let primed = rx.recv()?;
    print_rows("Initial mirror", &primed);

    // Optimistic create, confirmed by the remote.
    let ann = repo.create(RecordFields::new("Ann", 30, 50_000))?;
    println!("[OK] created Ann under server id {:?}", ann.id);
    let bo = repo.create(RecordFields::new("Bo", 25, 40_000))?;
    println!("[OK] created Bo under server id {:?}\n", bo.id);
    print_rows("After two creates", &store.all()?);

    // Optimistic update, confirmed.
    let mut raise = ann.clone();
    raise.salary = 56_000;
    repo.update(raise)?;
    println!("[OK] Ann got a raise\n");

    // Now the network goes away: the update is applied locally,
    // rejected remotely, and rolled back.
    remote.set_update(Err(RemoteError::unreachable("airplane mode")));
    let mut doomed = ann.clone();
    doomed.salary = 99_000;
    match repo.update(doomed) {
        Ok(_) => unreachable!("the remote is down"),
        Err(err) => println!("[ROLLED BACK] update failed: {err}"),
    }
    print_rows("After the failed update", &store.all()?);

    // Same for delete.
    remote.set_delete(Err(RemoteError::rejected("still referenced")));
    match repo.delete(bo.id.unwrap()) {
        Ok(()) => unreachable!("the remote rejects deletes"),
        Err(err) => println!("[ROLLED BACK] delete failed: {err}"),
    }
    print_rows("After the failed delete", &store.all()?);

    // Connectivity returns; the delete goes through.
    remote.set_delete(Ok(()));
    repo.delete(bo.id.unwrap())?;
    println!("[OK] Bo deleted\n");
    print_rows("Final mirror", &store.all()?);

    // Give the watch-triggered refresh a moment, then show counters.
    std::thread::sleep(Duration::from_millis(100));
    let stats = repo.stats();
    println!(
        "stats: {} creates, {} updates, {} deletes, {} rollbacks, {} refreshes",
        stats.creates_confirmed,
        stats.updates_confirmed,
        stats.deletes_confirmed,
        stats.rollbacks,
        stats.refreshes_completed,
    );

    Ok(())
}
