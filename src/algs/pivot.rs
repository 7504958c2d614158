//! Deterministic pivot selection.
//!
//! When a domain vertex has several targets, one of them is chosen as the
//! pivot of the cancellation. Survivor counts per degree do not depend on
//! the choice, but the surviving identifiers and every intermediate graph
//! do, so the choice is always a pure function of the candidate set.

use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::graph::GeneratorLike;

/// Rule for picking the pivot target among a vertex's outgoing neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotStrategy {
    /// Smallest generator under its total order.
    #[default]
    Min,
    /// Largest generator under its total order.
    Max,
    /// Smallest generator under a seeded hash (ties broken by `Ord`).
    ///
    /// Reproducible for a fixed seed, but uncorrelated with the generator
    /// order; useful for checking that results do not depend on the order.
    Scrambled { seed: u64 },
}

impl PivotStrategy {
    /// Choose one candidate, or `None` if there are none.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::algs::pivot::PivotStrategy;
    /// let targets = [5, 2, 9];
    /// assert_eq!(PivotStrategy::Min.select(targets.iter()), Some(&2));
    /// assert_eq!(PivotStrategy::Max.select(targets.iter()), Some(&9));
    /// assert_eq!(PivotStrategy::Min.select(std::iter::empty::<&u32>()), None);
    /// ```
    pub fn select<'a, G, I>(&self, candidates: I) -> Option<&'a G>
    where
        G: GeneratorLike + 'a,
        I: IntoIterator<Item = &'a G>,
    {
        let candidates = candidates.into_iter();
        match *self {
            PivotStrategy::Min => candidates.min(),
            PivotStrategy::Max => candidates.max(),
            PivotStrategy::Scrambled { seed } => {
                let state =
                    ahash::RandomState::with_seeds(seed, !seed, seed.rotate_left(17), 0x9e37);
                candidates.min_by_key(|g| (state.hash_one(*g), *g))
            }
        }
    }
}
