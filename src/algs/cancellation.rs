//! Algebraic Morse reduction of one outer-degree slice.
//!
//! The slice's generators are bucketed by inner degree and swept from the
//! top degree down. At each step the edges `x → y` between degree `k` and
//! degree `k - 1` are built from the differential, and every `x` that still
//! has a target is cancelled against one of them:
//!
//! ```text
//!      a   x             a
//!      |\ /|\             \
//!      | X | \    ==>      \
//!      |/ \|  \             \
//!      y   b   b'        b   b'
//! ```
//!
//! For every predecessor `a ≠ x` of `y` and every successor `b ≠ y` of `x`
//! the edge `a → b` is toggled (coefficients mod 2), then `x` and `y` are
//! deleted. Vertices with no target are never cancelled; whatever is live
//! after the sweep is the homology basis of the slice.

use std::collections::{BTreeMap, BTreeSet};

use crate::algs::differential::Differential;
use crate::algs::pivot::PivotStrategy;
use crate::debug_invariants::DebugInvariants;
use crate::grading::Bigraded;
use crate::graph::ChainGraph;
use crate::morse_error::MorseError;

/// Edge flips performed by one cancellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggles {
    /// `a → b` edges created.
    pub on: usize,
    /// `a → b` edges deleted.
    pub off: usize,
}

/// Counters collected while reducing one slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Generators handed to the engine.
    pub generators: usize,
    /// Distinct edges built from the differential.
    pub edges_built: usize,
    /// Differential terms that fell outside the codomain bucket.
    pub foreign_terms: usize,
    /// `(x, y)` pairs cancelled.
    pub pairs_cancelled: usize,
    pub edges_toggled_on: usize,
    pub edges_toggled_off: usize,
    /// Live vertices after the sweep.
    pub survivors: usize,
}

/// Cancel the pivot edge `x → y` in place.
///
/// Toggles `a → b` for every `a ∈ incoming(y) ∖ {x}` and
/// `b ∈ outgoing(x) ∖ {y}`, then removes `x` and `y`.
///
/// The step is all-or-nothing: every precondition is checked before the
/// graph is touched.
///
/// # Errors
/// - [`MorseError::NotFound`] if `x` or `y` is not live, or `x → y` is not
///   an edge.
/// - [`MorseError::InvalidEdge`] if some `a` would be toggled against itself
///   (`a` both precedes `y` and succeeds `x`).
///
/// # Example
/// ```rust
/// use morse_homology::algs::cancellation::cancel_pair;
/// use morse_homology::graph::{ArenaGraph, ChainGraph};
/// let mut g = ArenaGraph::from_edges(
///     ["a", "x", "y", "b"],
///     [("x", "y"), ("x", "b"), ("a", "y")],
/// )
/// .unwrap();
/// let t = cancel_pair(&mut g, &"x", &"y").unwrap();
/// assert_eq!(t.on, 1);
/// assert!(g.has_edge(&"a", &"b"));
/// assert_eq!(g.vertex_count(), 2);
/// ```
pub fn cancel_pair<Gr>(
    graph: &mut Gr,
    x: &Gr::Generator,
    y: &Gr::Generator,
) -> Result<Toggles, MorseError>
where
    Gr: ChainGraph,
{
    if !graph.has_edge(x, y) {
        for v in [x, y] {
            if !graph.contains(v) {
                return Err(MorseError::not_found(v));
            }
        }
        return Err(MorseError::NotFound(format!("edge {x:?} -> {y:?}")));
    }

    let preds: Vec<Gr::Generator> = graph.incoming(y)?.filter(|a| *a != x).cloned().collect();
    let succs: Vec<Gr::Generator> = graph.outgoing(x)?.filter(|b| *b != y).cloned().collect();
    if let Some(a) = preds.iter().find(|a| succs.contains(a)) {
        return Err(MorseError::invalid_edge(a));
    }

    let mut toggles = Toggles::default();
    for a in &preds {
        for b in &succs {
            if graph.has_edge(a, b) {
                graph.disconnect(a, b);
                toggles.off += 1;
            } else {
                graph.connect(a, b)?;
                toggles.on += 1;
            }
        }
    }
    graph.remove(x)?;
    graph.remove(y)?;
    Ok(toggles)
}

/// Reduce one outer-degree slice into `graph`.
///
/// `graph` is expected to start empty; on success its live vertices are
/// exactly the survivors of the slice. A slice inhabiting a single inner
/// degree has nothing to cancel and all of its generators survive.
///
/// # Errors
/// - [`MorseError::EmptyRange`] if `generators` is empty.
/// - Any error from [`cancel_pair`]; the graph is then left mid-sweep and
///   should be discarded.
pub fn reduce_slice<Gr, D, I>(
    graph: &mut Gr,
    generators: I,
    differential: &D,
    pivot: PivotStrategy,
) -> Result<ReductionStats, MorseError>
where
    Gr: ChainGraph + DebugInvariants,
    Gr::Generator: Bigraded,
    D: Differential<Gr::Generator> + ?Sized,
    I: IntoIterator<Item = Gr::Generator>,
{
    let mut buckets: BTreeMap<i32, BTreeSet<Gr::Generator>> = BTreeMap::new();
    for g in generators {
        buckets.entry(g.maslov_degree()).or_default().insert(g);
    }
    let (Some(&k_min), Some(&k_max)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Err(MorseError::EmptyRange);
    };

    let mut stats = ReductionStats {
        generators: buckets.values().map(BTreeSet::len).sum(),
        ..ReductionStats::default()
    };

    // Only inhabited degrees are visited; bucket k - 1 holds the codomain
    // survivors carried down from the previous step.
    while let Some((k, domain)) = buckets.pop_last() {
        graph.try_add_vertices(domain.iter().cloned())?;
        if k == k_min {
            break;
        }
        let mut codomain = buckets.remove(&(k - 1)).unwrap_or_default();
        graph.try_add_vertices(codomain.iter().cloned())?;

        // connect [k] -> [k - 1]
        for x in &domain {
            for y in differential.apply(x) {
                if !codomain.contains(&y) {
                    stats.foreign_terms += 1;
                    continue;
                }
                if !graph.has_edge(x, &y) {
                    graph.connect(x, &y)?;
                    stats.edges_built += 1;
                }
            }
        }

        // cancel
        let before = codomain.len();
        for x in &domain {
            let Some(y) = pivot.select(graph.outgoing(x)?).cloned() else {
                continue;
            };
            let toggles = cancel_pair(graph, x, &y)?;
            stats.pairs_cancelled += 1;
            stats.edges_toggled_on += toggles.on;
            stats.edges_toggled_off += toggles.off;
            codomain.remove(&y);
        }
        log::trace!(
            "degree {k}: {} of {} domain vertices cancelled, {} codomain vertices carried down",
            before - codomain.len(),
            domain.len(),
            codomain.len()
        );

        if !codomain.is_empty() {
            buckets.insert(k - 1, codomain);
        }
        crate::debug_invariants!(graph.validate_invariants(), "reduce_slice");
    }

    stats.survivors = graph.vertex_count();
    log::debug!(
        "reduced {} generators in degrees {k_min}..={k_max}: {} pairs cancelled, {} survivors",
        stats.generators,
        stats.pairs_cancelled,
        stats.survivors
    );
    Ok(stats)
}

/// [`reduce_slice`] into a fresh graph of type `Gr`.
pub fn reduced_graph<Gr, D, I>(
    generators: I,
    differential: &D,
    pivot: PivotStrategy,
) -> Result<(Gr, ReductionStats), MorseError>
where
    Gr: ChainGraph + DebugInvariants + Default,
    Gr::Generator: Bigraded,
    D: Differential<Gr::Generator> + ?Sized,
    I: IntoIterator<Item = Gr::Generator>,
{
    let mut graph = Gr::default();
    let stats = reduce_slice(&mut graph, generators, differential, pivot)?;
    Ok((graph, stats))
}
