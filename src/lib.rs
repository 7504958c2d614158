#![cfg_attr(docsrs, feature(doc_cfg))]
//! # morse-homology
//!
//! Computes the bigraded homology ranks of a finite chain complex over
//! `Z/2` by algebraic Morse reduction: pairs of generators joined by the
//! differential are cancelled one at a time, the graph is patched so that
//! the homology of what is left does not change, and the generators that
//! survive are counted per bidegree.
//!
//! The complex is supplied by its owner as
//! - a finite set of generators implementing [`grading::Bigraded`], and
//! - a differential oracle implementing [`algs::Differential`] (a closure,
//!   an explicit [`algs::BoundaryTable`], or a coefficient-valued map
//!   wrapped in [`algs::Mod2`]).
//!
//! Generators of different outer (Alexander) degree never interact, so each
//! outer degree is reduced independently; with the `rayon` feature
//! (enabled by default) the slices run in parallel.
//!
//! ## Determinism
//!
//! Pivot choice is a pure function of the candidate set
//! ([`algs::PivotStrategy`]), so repeated runs produce identical graphs.
//! Survivor counts do not depend on the strategy at all.
//!
//! ## Example
//! ```rust
//! use morse_homology::prelude::*;
//!
//! // a circle: two vertices, two edges, each edge bounding both vertices
//! let v0 = Graded::new("v0", 0, 0);
//! let v1 = Graded::new("v1", 0, 0);
//! let e0 = Graded::new("e0", 0, 1);
//! let e1 = Graded::new("e1", 0, 1);
//! let d = BoundaryTable::from_pairs([
//!     (e0.clone(), v0.clone()),
//!     (e0.clone(), v1.clone()),
//!     (e1.clone(), v0.clone()),
//!     (e1.clone(), v1.clone()),
//! ]);
//! let table = compute_rank_table([v0, v1, e0, e1], &d, &ReductionConfig::default()).unwrap();
//! assert_eq!(table.into_triples(), vec![(0, 0, 1), (1, 0, 1)]);
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod grading;
pub mod graph;
pub mod morse_error;

pub use debug_invariants::DebugInvariants;

/// The most-used traits and types.
pub mod prelude {
    pub use crate::algs::cancellation::{ReductionStats, cancel_pair, reduce_slice, reduced_graph};
    pub use crate::algs::config::{GraphBackend, ReductionConfig, SliceErrorPolicy};
    pub use crate::algs::differential::{BoundaryTable, Differential, Mod2};
    pub use crate::algs::pivot::PivotStrategy;
    pub use crate::algs::rank_table::{RankEntry, RankTable, compute_rank_table, survivor_counts};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::grading::{Bidegree, Bigraded, Graded};
    pub use crate::graph::{ArenaGraph, ChainGraph, GeneratorLike, InMemoryGraph, VertexIndex};
    pub use crate::morse_error::MorseError;
}
