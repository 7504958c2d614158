//! Reduction algorithms over chain graphs.

pub mod cancellation;
pub mod config;
pub mod differential;
pub mod pivot;
pub mod rank_table;

pub use cancellation::{ReductionStats, Toggles, cancel_pair, reduce_slice, reduced_graph};
pub use config::{GraphBackend, ReductionConfig, SliceErrorPolicy};
pub use differential::{BoundaryTable, Differential, Mod2};
pub use pivot::PivotStrategy;
pub use rank_table::{RankEntry, RankTable, compute_rank_table, survivor_counts};
