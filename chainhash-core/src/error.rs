//! Error type for table construction and bucket addressing

use thiserror::Error;

/// Errors raised by the chained hash table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A computed bucket index fell outside `[0, capacity)`.
    ///
    /// Only an internal bug in hashing or capacity bookkeeping can produce
    /// this; the table operations treat it as fatal.
    #[error("bucket index {index} out of bounds for capacity {capacity}")]
    IndexOutOfBounds { index: usize, capacity: usize },

    #[error("initial capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    #[error("load factor must be a positive finite number, got {0}")]
    InvalidLoadFactor(f64),
}

pub type Result<T> = std::result::Result<T, TableError>;
