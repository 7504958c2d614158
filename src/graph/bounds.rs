//! Common bound aliases used across graph code.
//!
//! Blanket-implemented, so any type satisfying the underlying bounds is a
//! generator. They only shorten `where` clauses.

/// Canonical bound set for generator identifiers.
///
/// - `Clone` because generators are opaque and may own heap data
/// - `Eq + Hash` for the identity → vertex maps
/// - `Ord` for deterministic pivot selection and bucket iteration
/// - `Debug` for error messages and invariant checks
pub trait GeneratorLike: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug {}
impl<T> GeneratorLike for T where T: Clone + Eq + std::hash::Hash + Ord + std::fmt::Debug {}
