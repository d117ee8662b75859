//! Example: three replicas of a shared shopping list going offline and
//! syncing back, one list per resolution policy.
//!
//! Run with `RUST_LOG=tagset_crdt=trace` to see merges being logged.

use tagset_crdt::clock::LamportClock;
use tagset_crdt::events::{OpCrdt, SetOp};
use tagset_crdt::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Observed-Remove: concurrent add survives ===\n");

    let mut alice = ORSet::new();
    alice.add("milk", 1);
    alice.add("eggs", 2);

    let mut bob = alice.clone();
    println!("Both start with: {:?}", alice.to_vec());

    // Offline: Alice drops milk, Bob adds milk again.
    alice.remove(&"milk");
    bob.add("milk", 3);
    println!("Alice: {:?}", alice.to_vec());
    println!("Bob:   {:?}", bob.to_vec());

    alice.merge(&bob);
    bob.merge(&alice);
    println!("After sync: {:?} / {:?}", alice.to_vec(), bob.to_vec());

    println!("\n=== Last-Write-Wins with Lamport clocks ===\n");

    let mut clock_a = LamportClock::new("alice");
    let mut clock_b = LamportClock::new("bob");
    let mut list_a = LWWSet::with_comparator(LamportClock::comparator());
    let mut list_b = LWWSet::with_comparator(LamportClock::comparator());

    clock_a = clock_a.tick();
    list_a.add("bread", clock_a.clone());
    list_b.merge(&list_a);
    clock_b.merge(&clock_a);

    clock_b = clock_b.tick();
    list_b.remove(&"bread", clock_b.clone());
    println!("Bob removed bread at {:?}", clock_b);

    list_a.merge(&list_b);
    println!("Alice after sync: {:?}", list_a.to_vec());

    println!("\n=== Two-Phase: removal is final ===\n");

    let mut chores = TwoPSet::new();
    chores.insert("dishes");
    chores.remove(&"dishes");
    let restored = chores.insert("dishes");
    println!("Re-added dishes: {restored}, list: {:?}", chores.to_vec());

    println!("\n=== Grow-Only: removes are rejected ===\n");

    let mut log = GSet::new();
    let history = [SetOp::add("created", ()), SetOp::remove("created", ())];
    match log.replay(&history) {
        Ok(changed) => println!("Replayed {changed} operations"),
        Err(err) => println!("Replay stopped: {err}"),
    }
    println!("Log: {:?}", log.to_vec());

    println!("\n=== Counters ===\n");

    let mut visits_a = PNCounter::new("alice");
    let mut visits_b = PNCounter::new("bob");
    visits_a.increment_by(3);
    visits_b.decrement();
    visits_a.merge(&visits_b);
    println!("Net visits: {}", visits_a.value());
}
