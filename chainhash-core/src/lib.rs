//! Chained hash table - separate chaining with load-factor driven growth
//!
//! Core library providing:
//! - Polynomial rolling hash over character codes
//! - Ordered buckets resolving collisions by chaining
//! - Capacity doubling with full rehash when the load factor is exceeded
//! - A set type wrapping the table
//! - Order-independent content digests
//!
//! The structures are single-threaded: all mutation goes through `&mut self`
//! and nothing is synchronized internally.

pub mod config;
pub mod digest;
pub mod error;
pub mod hashset;
pub mod hashtable;
pub mod key;

pub use config::{TableConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use digest::ContentDigest;
pub use error::{Result, TableError};
pub use hashset::HashSet;
pub use hashtable::HashTable;
pub use key::{polynomial_hash, TableKey};
