//! Degree aggregation: from reduced graphs to bigraded rank tables.
//!
//! The generator set is split by outer (Alexander) degree. Each slice is
//! reduced in a graph it owns, the survivors are counted per inner (Maslov)
//! degree, and the per-slice counts are concatenated. Slices share nothing,
//! so with the `rayon` feature they are distributed over the rayon pool.

use std::collections::BTreeMap;

use itertools::Itertools;

use super::cancellation::{ReductionStats, reduced_graph};
use super::config::{GraphBackend, ReductionConfig, SliceErrorPolicy};
use super::differential::Differential;
use crate::grading::Bigraded;
use crate::graph::{ArenaGraph, ChainGraph, GeneratorLike, InMemoryGraph};
use crate::morse_error::MorseError;

/// One nonzero cell of a rank table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RankEntry {
    /// Maslov degree.
    pub inner: i32,
    /// Alexander degree.
    pub outer: i32,
    pub multiplicity: usize,
}

impl RankEntry {
    pub fn new(inner: i32, outer: i32, multiplicity: usize) -> Self {
        Self {
            inner,
            outer,
            multiplicity,
        }
    }

    /// `(inner, outer, multiplicity)`.
    pub fn as_triple(&self) -> (i32, i32, usize) {
        (self.inner, self.outer, self.multiplicity)
    }
}

/// Bigraded ranks, sorted by outer then inner degree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankTable {
    entries: Vec<RankEntry>,
    skipped: Vec<i32>,
    stats: BTreeMap<i32, ReductionStats>,
}

impl RankTable {
    /// Build a table from entries in any order.
    ///
    /// Zero multiplicities are dropped and repeated cells are summed.
    pub fn from_entries<I: IntoIterator<Item = RankEntry>>(entries: I) -> Self {
        let mut table = Self::default();
        table.extend(entries);
        table
    }

    fn extend<I: IntoIterator<Item = RankEntry>>(&mut self, entries: I) {
        let mut cells: BTreeMap<(i32, i32), usize> = self
            .entries
            .drain(..)
            .map(|e| ((e.outer, e.inner), e.multiplicity))
            .collect();
        for e in entries {
            *cells.entry((e.outer, e.inner)).or_default() += e.multiplicity;
        }
        self.entries = cells
            .into_iter()
            .filter(|&(_, n)| n > 0)
            .map(|((outer, inner), n)| RankEntry::new(inner, outer, n))
            .collect();
    }

    /// Direct sum of two tables computed from disjoint generator sets.
    pub fn merge(mut self, other: RankTable) -> Self {
        self.extend(other.entries);
        self.skipped.extend(other.skipped);
        self.skipped.sort_unstable();
        self.skipped.dedup();
        self.stats.extend(other.stats);
        self
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank at `(inner, outer)`, zero if absent.
    pub fn rank(&self, inner: i32, outer: i32) -> usize {
        self.entries
            .binary_search_by_key(&(outer, inner), |e| (e.outer, e.inner))
            .map_or(0, |i| self.entries[i].multiplicity)
    }

    /// Outer degrees with at least one nonzero rank, ascending.
    pub fn outer_degrees(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.outer).dedup().collect()
    }

    /// Entries of one outer-degree slice.
    pub fn slice(&self, outer: i32) -> &[RankEntry] {
        let lo = self.entries.partition_point(|e| e.outer < outer);
        let hi = self.entries.partition_point(|e| e.outer <= outer);
        &self.entries[lo..hi]
    }

    /// `Σₖ (-1)ᵏ rank(k, outer)`.
    pub fn euler_characteristic(&self, outer: i32) -> i64 {
        euler_characteristic(self.slice(outer).iter().map(|e| (e.inner, e.multiplicity)))
    }

    /// Euler characteristic of every outer degree present.
    pub fn euler_characteristics(&self) -> BTreeMap<i32, i64> {
        self.outer_degrees()
            .into_iter()
            .map(|a| (a, self.euler_characteristic(a)))
            .collect()
    }

    pub fn total_rank(&self) -> usize {
        self.entries.iter().map(|e| e.multiplicity).sum()
    }

    /// Outer degrees whose slice failed under [`SliceErrorPolicy::Skip`].
    pub fn skipped_slices(&self) -> &[i32] {
        &self.skipped
    }

    /// Reduction counters per outer degree (reduced slices only).
    pub fn slice_stats(&self) -> &BTreeMap<i32, ReductionStats> {
        &self.stats
    }

    /// `(inner, outer, multiplicity)` triples in table order.
    pub fn into_triples(self) -> Vec<(i32, i32, usize)> {
        self.entries.iter().map(RankEntry::as_triple).collect()
    }
}

impl<'a> IntoIterator for &'a RankTable {
    type Item = &'a RankEntry;
    type IntoIter = std::slice::Iter<'a, RankEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `Σ (-1)ᵏ nₖ` over `(k, nₖ)` pairs.
pub fn euler_characteristic<I: IntoIterator<Item = (i32, usize)>>(counts: I) -> i64 {
    counts
        .into_iter()
        .map(|(k, n)| if k.rem_euclid(2) == 0 { n as i64 } else { -(n as i64) })
        .sum()
}

/// Count the live vertices of a reduced slice per inner degree.
///
/// Entries come back sorted by inner degree, nonzero only.
pub fn survivor_counts<Gr>(graph: &Gr, outer: i32) -> Vec<RankEntry>
where
    Gr: ChainGraph,
    Gr::Generator: Bigraded,
{
    debug_assert!(
        graph.vertices().all(|g| g.alexander_degree() == outer),
        "survivor outside outer degree {outer}"
    );
    graph
        .vertices()
        .map(|g| g.maslov_degree())
        .counts()
        .into_iter()
        .sorted_unstable()
        .map(|(inner, n)| RankEntry::new(inner, outer, n))
        .collect()
}

type SliceResult = Result<(Vec<RankEntry>, ReductionStats), MorseError>;

fn reduce_one<G, D>(outer: i32, generators: Vec<G>, differential: &D, config: &ReductionConfig) -> SliceResult
where
    G: GeneratorLike + Bigraded,
    D: Differential<G> + ?Sized,
{
    let reduced = match config.backend {
        GraphBackend::Arena => {
            reduced_graph::<ArenaGraph<G>, _, _>(generators, differential, config.pivot)
                .map(|(graph, stats)| (survivor_counts(&graph, outer), stats))
        }
        GraphBackend::InMemory => {
            reduced_graph::<InMemoryGraph<G>, _, _>(generators, differential, config.pivot)
                .map(|(graph, stats)| (survivor_counts(&graph, outer), stats))
        }
    };
    reduced.map_err(|e| e.in_slice(outer))
}

fn run_slices<G, D>(
    slices: Vec<(i32, Vec<G>)>,
    differential: &D,
    config: &ReductionConfig,
) -> Vec<(i32, SliceResult)>
where
    G: GeneratorLike + Bigraded + Send,
    D: Differential<G> + Sync + ?Sized,
{
    #[cfg(feature = "rayon")]
    if config.parallel {
        use rayon::prelude::*;
        return slices
            .into_par_iter()
            .map(|(a, gens)| (a, reduce_one(a, gens, differential, config)))
            .collect();
    }
    slices
        .into_iter()
        .map(|(a, gens)| (a, reduce_one(a, gens, differential, config)))
        .collect()
}

/// Compute the rank table of a bigraded complex.
///
/// # Errors
/// - [`MorseError::EmptyRange`] if no generator is left to reduce after the
///   [`outer_range`](ReductionConfig::outer_range) filter.
/// - Under [`SliceErrorPolicy::Abort`], the failure of the lowest failing
///   outer degree, wrapped in [`MorseError::Slice`].
///
/// # Example
/// ```rust
/// use morse_homology::algs::config::ReductionConfig;
/// use morse_homology::algs::differential::BoundaryTable;
/// use morse_homology::algs::rank_table::compute_rank_table;
/// use morse_homology::grading::Graded;
///
/// let (x, y, z) = (Graded::new('x', 0, 1), Graded::new('y', 0, 0), Graded::new('z', 1, 0));
/// let d = BoundaryTable::from_pairs([(x.clone(), y.clone())]);
/// let table = compute_rank_table([x, y, z], &d, &ReductionConfig::default()).unwrap();
/// assert_eq!(table.into_triples(), vec![(0, 1, 1)]);
/// ```
pub fn compute_rank_table<G, D, I>(
    generators: I,
    differential: &D,
    config: &ReductionConfig,
) -> Result<RankTable, MorseError>
where
    G: GeneratorLike + Bigraded + Send,
    D: Differential<G> + Sync + ?Sized,
    I: IntoIterator<Item = G>,
{
    let slices: BTreeMap<i32, Vec<G>> = generators
        .into_iter()
        .filter(|g| config.includes_outer(g.alexander_degree()))
        .into_group_map_by(|g| g.alexander_degree())
        .into_iter()
        .collect();
    if slices.is_empty() {
        return Err(MorseError::EmptyRange);
    }
    log::debug!(
        "reducing {} slices in outer degrees {:?}",
        slices.len(),
        slices.keys().collect_vec()
    );

    let mut table = RankTable::default();
    for (outer, result) in run_slices(slices.into_iter().collect(), differential, config) {
        let part = match result {
            Ok((entries, stats)) => RankTable {
                entries,
                skipped: Vec::new(),
                stats: BTreeMap::from([(outer, stats)]),
            },
            Err(e) => match config.on_slice_error {
                SliceErrorPolicy::Abort => return Err(e),
                SliceErrorPolicy::Skip => {
                    log::warn!("skipping outer degree {outer}: {e}");
                    RankTable {
                        skipped: vec![outer],
                        ..RankTable::default()
                    }
                }
            },
        };
        table = table.merge(part);
    }
    Ok(table)
}
