//! Basic usage example for nestkv
//!
//! This example demonstrates the fundamental operations:
//! - Writing and reading keys outside a transaction
//! - Nesting transactions and rolling back the innermost one
//! - Committing every open transaction at once

use nestkv::{Error, KvStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let store = KvStore::new();

    println!("Writing data...");
    store.set("a", 10);
    store.set("b", 20);
    println!("a => {:?}", store.get("a"));

    println!("Opening two nested transactions...");
    store.begin();
    store.set("a", 11);
    store.begin();
    store.unset("b");
    println!("depth {}: a => {:?}, b => {:?}", store.depth(), store.get("a"), store.get("b"));

    println!("Rolling back the inner transaction...");
    store.rollback()?;
    println!("depth {}: b => {:?}", store.depth(), store.get("b"));

    println!("Committing...");
    store.commit()?;
    println!("committed: {:?}", store.snapshot().iter().collect::<Vec<_>>());

    // Nothing left to commit
    match store.commit() {
        Err(Error::NoTransaction) => println!("NO TRANSACTION"),
        other => println!("unexpected: {:?}", other),
    }

    Ok(())
}
