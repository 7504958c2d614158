//! Knobs for [`compute_rank_table`](super::rank_table::compute_rank_table).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::pivot::PivotStrategy;

/// Graph representation used for each slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphBackend {
    /// [`ArenaGraph`](crate::graph::ArenaGraph).
    #[default]
    Arena,
    /// [`InMemoryGraph`](crate::graph::InMemoryGraph).
    InMemory,
}

/// What to do when one slice fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceErrorPolicy {
    /// Return the first failure.
    #[default]
    Abort,
    /// Log it, record the outer degree as skipped, and keep going.
    Skip,
}

/// Configuration for a rank-table computation.
///
/// # Example
/// ```rust
/// use morse_homology::algs::config::{ReductionConfig, SliceErrorPolicy};
/// let cfg = ReductionConfig {
///     outer_range: Some(0..=3),
///     on_slice_error: SliceErrorPolicy::Skip,
///     ..Default::default()
/// };
/// assert!(cfg.includes_outer(2));
/// assert!(!cfg.includes_outer(-1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    pub pivot: PivotStrategy,
    pub backend: GraphBackend,
    pub on_slice_error: SliceErrorPolicy,
    /// Keep only generators whose outer degree lies in this range. Only
    /// inhabited degrees become slices, so the range may be open-ended, as
    /// in `Some(0..=i32::MAX)`.
    pub outer_range: Option<RangeInclusive<i32>>,
    /// Distribute slices over the rayon pool. Ignored without the `rayon`
    /// feature.
    pub parallel: bool,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            pivot: PivotStrategy::Min,
            backend: GraphBackend::Arena,
            on_slice_error: SliceErrorPolicy::Abort,
            outer_range: None,
            parallel: true,
        }
    }
}

impl ReductionConfig {
    /// Whether generators of outer degree `a` take part.
    pub fn includes_outer(&self, a: i32) -> bool {
        self.outer_range.as_ref().is_none_or(|r| r.contains(&a))
    }

    /// Single-threaded variant of `self`.
    pub fn sequential(self) -> Self {
        Self {
            parallel: false,
            ..self
        }
    }
}
