//! Core trait for directed chain graphs.
//!
//! A chain graph has one vertex per live generator and an edge `v → w`
//! whenever the (mod 2) differential of `v` hits `w`. The reduction engine
//! only talks to graphs through [`ChainGraph`], so both backends
//! ([`ArenaGraph`](super::ArenaGraph) and
//! [`InMemoryGraph`](super::InMemoryGraph)) are interchangeable.

use super::bounds::GeneratorLike;
use crate::morse_error::MorseError;

/// A mutable directed graph keyed by generator identity.
///
/// Invariants every implementation upholds:
/// - edges only join vertices that are both live;
/// - no vertex has an edge to itself;
/// - `w ∈ outgoing(v)` iff `v ∈ incoming(w)`.
pub trait ChainGraph {
    type Generator: GeneratorLike;

    /// Iterator over a neighbor set.
    type Neighbors<'a>: Iterator<Item = &'a Self::Generator>
    where
        Self: 'a;

    /// Iterator over live vertices.
    type Vertices<'a>: Iterator<Item = &'a Self::Generator>
    where
        Self: 'a;

    /// Insert `g` with empty neighbor sets. No-op if `g` is already live.
    fn add_vertex(&mut self, g: Self::Generator);

    /// Bulk [`add_vertex`](Self::add_vertex).
    fn add_vertices<I>(&mut self, gs: I)
    where
        I: IntoIterator<Item = Self::Generator>,
    {
        for g in gs {
            self.add_vertex(g);
        }
    }

    /// [`add_vertex`](Self::add_vertex) that reports running out of vertex
    /// handles instead of panicking.
    fn try_add_vertex(&mut self, g: Self::Generator) -> Result<(), MorseError> {
        self.add_vertex(g);
        Ok(())
    }

    /// Bulk [`try_add_vertex`](Self::try_add_vertex); stops at the first error.
    fn try_add_vertices<I>(&mut self, gs: I) -> Result<(), MorseError>
    where
        I: IntoIterator<Item = Self::Generator>,
    {
        gs.into_iter().try_for_each(|g| self.try_add_vertex(g))
    }

    /// Whether `g` is live.
    fn contains(&self, g: &Self::Generator) -> bool;

    /// Add the edge `v → w`. Idempotent.
    ///
    /// # Errors
    /// - [`MorseError::InvalidEdge`] if `v == w`; the graph is untouched.
    /// - [`MorseError::NotFound`] if either endpoint is not live.
    fn connect(&mut self, v: &Self::Generator, w: &Self::Generator) -> Result<(), MorseError>;

    /// Drop the edge `v → w` in both directions. No-op if absent.
    fn disconnect(&mut self, v: &Self::Generator, w: &Self::Generator);

    /// Whether the edge `v → w` exists.
    fn has_edge(&self, v: &Self::Generator, w: &Self::Generator) -> bool;

    /// Remove `v` and scrub it from every neighbor set.
    ///
    /// # Errors
    /// [`MorseError::NotFound`] if `v` is not live.
    fn remove(&mut self, v: &Self::Generator) -> Result<(), MorseError>;

    /// Targets of `v`.
    fn outgoing<'a>(&'a self, v: &Self::Generator) -> Result<Self::Neighbors<'a>, MorseError>;

    /// Sources of `v`.
    fn incoming<'a>(&'a self, v: &Self::Generator) -> Result<Self::Neighbors<'a>, MorseError>;

    fn out_degree(&self, v: &Self::Generator) -> Result<usize, MorseError> {
        Ok(self.outgoing(v)?.count())
    }

    fn in_degree(&self, v: &Self::Generator) -> Result<usize, MorseError> {
        Ok(self.incoming(v)?.count())
    }

    /// All live vertices.
    fn vertices(&self) -> Self::Vertices<'_>;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize {
        self.vertices()
            .map(|v| self.out_degree(v).unwrap_or(0))
            .sum()
    }

    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Live vertices in ascending generator order.
    fn vertices_sorted(&self) -> Vec<Self::Generator> {
        let mut vs: Vec<_> = self.vertices().cloned().collect();
        vs.sort_unstable();
        vs
    }
}
