//! Key capability and the polynomial bucket hash
//!
//! Keys are sequences of character codes. Text keys yield UTF-16 code units,
//! byte keys yield their bytes. Owned and borrowed forms of the same key
//! yield identical sequences, so lookups by `&str` find `String` keys.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Multiplier of the rolling hash
const HASH_PRIME: u128 = 31;

/// A key that can be hashed into a bucket
pub trait TableKey: Eq {
    /// Character codes of the key, in order
    fn code_units(&self) -> impl Iterator<Item = u32> + '_;
}

impl TableKey for str {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        self.encode_utf16().map(u32::from)
    }
}

impl TableKey for String {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        self.as_str().code_units()
    }
}

impl TableKey for Box<str> {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).code_units()
    }
}

impl TableKey for Rc<str> {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).code_units()
    }
}

impl TableKey for Arc<str> {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).code_units()
    }
}

impl TableKey for Cow<'_, str> {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).code_units()
    }
}

impl TableKey for [u8] {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|&byte| u32::from(byte))
    }
}

impl TableKey for Vec<u8> {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        self.as_slice().code_units()
    }
}

impl<T: TableKey + ?Sized> TableKey for &T {
    fn code_units(&self) -> impl Iterator<Item = u32> + '_ {
        (**self).code_units()
    }
}

/// Map `key` to a bucket index in `[0, capacity)`
///
/// Rolling hash `acc = (31 * acc + c) mod capacity` over the key's code
/// units. The accumulator is reduced at every step and kept in `u128`, so the
/// product never wraps for any `usize` capacity.
///
/// # Panics
/// If `capacity` is zero.
pub fn polynomial_hash<Q: TableKey + ?Sized>(key: &Q, capacity: usize) -> usize {
    assert!(capacity > 0, "capacity must be positive");
    let modulus = capacity as u128;

    let hash = key
        .code_units()
        .fold(0u128, |acc, unit| (HASH_PRIME * acc + u128::from(unit)) % modulus);

    hash as usize
}
