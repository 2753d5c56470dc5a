//! Construction parameters for hash tables and sets

use crate::error::{Result, TableError};

/// Number of buckets a table starts with unless configured otherwise
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Entries-per-bucket ratio above which a table doubles its capacity
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial capacity and growth threshold for a table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableConfig {
    /// Bucket count at construction (must be positive)
    pub initial_capacity: usize,

    /// Growth threshold (must be positive and finite)
    pub load_factor: f64,
}

impl TableConfig {
    pub fn new(initial_capacity: usize, load_factor: f64) -> Self {
        TableConfig {
            initial_capacity,
            load_factor,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Check both parameters, reporting the first one that is out of range
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidCapacity(self.initial_capacity));
        }
        if !(self.load_factor.is_finite() && self.load_factor > 0.0) {
            return Err(TableError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }
}
