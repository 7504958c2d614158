//! Structural self-checks for graph backends.
//!
//! Checks run in debug builds, or in release builds with the
//! `strict-invariants` / `check-invariants` features.

use crate::morse_error::MorseError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), MorseError>;

    /// Panic on the first violation when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "graph");
    }
}

/// Run a fallible check and panic with `ctx` on error when invariant
/// checking is enabled. Compiles to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
