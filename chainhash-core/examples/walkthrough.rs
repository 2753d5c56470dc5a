//! Walkthrough of the chained hash table and set
//!
//! Demonstrates:
//! - Filling a table up to its growth threshold
//! - Overwriting without growth
//! - The insert that doubles capacity
//! - Lookups, removal, and snapshots
//! - The set wrapper
//!
//! Run with `RUST_LOG=debug` to see resize events.

use chainhash_core::{HashSet, HashTable, TableConfig, TableError};

fn main() -> Result<(), TableError> {
    env_logger::init();

    println!("=== Chained Hash Table Walkthrough ===\n");

    let mut table = HashTable::with_config(TableConfig::default())?;
    let pairs = [
        ("apple", "red"),
        ("banana", "yellow"),
        ("carrot", "orange"),
        ("dog", "brown"),
        ("elephant", "gray"),
        ("frog", "green"),
        ("grape", "purple"),
        ("hat", "black"),
        ("ice cream", "white"),
        ("jacket", "blue"),
        ("kite", "pink"),
        ("lion", "golden"),
    ];
    for (key, value) in pairs {
        table.set(key.to_string(), value.to_string());
    }

    println!("Length before resize: {} (expected 12)", table.len());
    println!("Capacity before resize: {} (expected 16)", table.capacity());

    table.set("apple".to_string(), "dark red".to_string());
    println!("Overwritten apple: {:?} (expected \"dark red\")", table.get("apple"));
    println!("Length still: {} (expected 12)", table.len());

    table.set("moon".to_string(), "silver".to_string());
    println!("Capacity after resize: {} (expected 32)", table.capacity());
    println!("Length after resize: {} (expected 13)", table.len());

    println!("Has lion? {} (expected true)", table.has("lion"));
    println!("Remove dog: {} (expected true)", table.remove("dog"));
    println!("Keys: {:?}", table.keys());
    println!("Values: {:?}", table.values());
    println!("Entries: {:?}", table.entries());

    println!("\n=== Set Walkthrough ===\n");

    let mut set = HashSet::with_config(TableConfig::default())?;
    set.add("a".to_string());
    set.add("b".to_string());
    set.add("c".to_string());
    println!("Set keys: {:?} (expected [\"a\", \"b\", \"c\"])", set.keys());
    println!("Has b? {} (expected true)", set.has("b"));
    println!("Remove b: {} (expected true)", set.remove("b"));
    println!("Has b now? {} (expected false)", set.has("b"));
    println!("Length: {} (expected 2)", set.len());

    Ok(())
}
