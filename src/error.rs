//! Error types for veb-tree.

use thiserror::Error;

/// Result type alias using VebError.
pub type Result<T> = core::result::Result<T, VebError>;

/// Errors reported at the construction and insert boundary.
///
/// Every other operation treats anomalous input (out-of-range or absent
/// keys, queries on an empty tree) as a sentinel `false`/`None` result
/// rather than an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VebError {
    /// Universe size was zero or not a power of two.
    ///
    /// The core is strict; callers that want rounding can apply
    /// [`u64::next_power_of_two`] before constructing.
    #[error("universe size must be a power of two greater than zero, got {0}")]
    InvalidUniverse(u64),

    /// Universe size exceeds the supported ceiling of 2^32.
    ///
    /// Above 2^32 the top-level cluster vector would need more than 2^16
    /// slots per halving step and key widths stop fitting comfortably in
    /// cache; the ceiling keeps every internal quantity trivially in range.
    #[error("universe size {0} exceeds the supported maximum of 2^32")]
    UniverseTooLarge(u64),

    /// Insert was called with a key outside [0, universe).
    ///
    /// The tree is left unchanged.
    #[error("key {key} is outside the universe [0, {universe})")]
    OutOfRange { key: u64, universe: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_invalid_universe_display() {
        let err = VebError::InvalidUniverse(24);
        assert_eq!(
            err.to_string(),
            "universe size must be a power of two greater than zero, got 24"
        );
    }

    #[test]
    fn test_universe_too_large_display() {
        let err = VebError::UniverseTooLarge(1 << 33);
        assert_eq!(
            err.to_string(),
            "universe size 8589934592 exceeds the supported maximum of 2^32"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = VebError::OutOfRange {
            key: 16,
            universe: 16,
        };
        assert_eq!(err.to_string(), "key 16 is outside the universe [0, 16)");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VebError>();
    }
}
