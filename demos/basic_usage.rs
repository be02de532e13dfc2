//! Basic usage example for multicast-delegate.
//!
//! Demonstrates:
//! - Registering closures, plain functions and bound methods
//! - Collecting results with `invoke()` and firing with `emit()`
//! - Exact removal with the returned `Entry` handle
//! - Merging and moving delegates
//!
//! Run with: `RUST_LOG=multicast_delegate=trace cargo run --example basic_usage`

use multicast_delegate::{define_delegate, Action, Delegate};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// A process-global delegate for this example
define_delegate!(on_shutdown, &'static str => ());

struct Thermostat {
    offset: i32,
}

impl Thermostat {
    fn adjust(&self, reading: i32) -> i32 {
        reading + self.offset
    }
}

fn add_one(x: i32) -> i32 {
    x + 1
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== multicast-delegate: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register listeners
    // -------------------------------------------------------------------------
    println!("1. Registering listeners...");

    let delegate = Delegate::from_fn(add_one);
    let doubler = delegate.add(|x| x * 2);
    delegate.add_entry(multicast_delegate::Entry::bound(
        Arc::new(Thermostat { offset: -3 }),
        Thermostat::adjust,
    ));

    println!("   Registered: add_one, doubler, thermostat ({} total)", delegate.len());

    // -------------------------------------------------------------------------
    // 2. Invoke
    // -------------------------------------------------------------------------
    println!("\n2. Invoking with 5...");
    println!("   Results: {:?}", delegate.invoke(5));

    // -------------------------------------------------------------------------
    // 3. Remove
    // -------------------------------------------------------------------------
    println!("\n3. Removing the doubler...");
    delegate.remove(&doubler);
    println!("   Results: {:?}", delegate.invoke(5));

    // -------------------------------------------------------------------------
    // 4. Merge and move
    // -------------------------------------------------------------------------
    println!("\n4. Merging into a second delegate, then moving it...");
    let combined: Delegate<i32, i32> = Delegate::new();
    combined.merge(&delegate).merge(&delegate);
    let moved = Delegate::take_from(&combined);
    println!(
        "   Moved {} entries; combined now holds {}",
        moved.len(),
        combined.len()
    );

    // -------------------------------------------------------------------------
    // 5. Actions and global delegates
    // -------------------------------------------------------------------------
    println!("\n5. Firing actions...");
    let greet: Action<String> = Action::new();
    greet.add(|name| println!("   Hello, {name}!"));
    greet.emit("delegate".to_string());

    on_shutdown::add(|reason| println!("   Shutting down: {reason}"));
    on_shutdown::emit("example finished");

    println!("\n=== Done ===");
}
