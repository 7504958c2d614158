//! In-memory implementation of the [`ChainGraph`] trait.
//!
//! This module provides [`InMemoryGraph`], a hash-map-of-sets representation:
//! every live generator owns a set of targets and a set of sources, keyed by
//! the generator itself. Neighbor iteration order is unspecified; callers
//! that need reproducible choices go through a
//! [`PivotStrategy`](crate::algs::pivot::PivotStrategy).

use std::collections::{HashMap, HashSet, hash_map, hash_set};

use super::bounds::GeneratorLike;
use super::graph_trait::ChainGraph;
use crate::debug_invariants::DebugInvariants;
use crate::morse_error::MorseError;

/// An in-memory chain graph using hash maps for adjacency storage.
#[derive(Clone, Debug)]
pub struct InMemoryGraph<G>
where
    G: GeneratorLike,
{
    /// Outgoing adjacency; its key set is the live vertex set.
    pub(crate) targets: HashMap<G, HashSet<G>>,
    /// Incoming adjacency mirror.
    pub(crate) sources: HashMap<G, HashSet<G>>,
}

impl<G: GeneratorLike> Default for InMemoryGraph<G> {
    fn default() -> Self {
        Self {
            targets: HashMap::new(),
            sources: HashMap::new(),
        }
    }
}

impl<G: GeneratorLike> InMemoryGraph<G> {
    /// Creates a new, empty `InMemoryGraph`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an `InMemoryGraph` from vertices and edges.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::graph::{ChainGraph, InMemoryGraph};
    /// let g = InMemoryGraph::from_edges([1, 2, 3], [(1, 2), (1, 3)]).unwrap();
    /// assert_eq!(g.outgoing(&1).unwrap().count(), 2);
    /// ```
    pub fn from_edges<V, E>(vertices: V, edges: E) -> Result<Self, MorseError>
    where
        V: IntoIterator<Item = G>,
        E: IntoIterator<Item = (G, G)>,
    {
        let mut graph = Self::new();
        graph.try_add_vertices(vertices)?;
        for (v, w) in edges {
            graph.connect(&v, &w)?;
        }
        Ok(graph)
    }

    #[inline]
    fn scrub_outgoing_only(&mut self, src: &G) {
        let old = self.targets.get_mut(src).map(std::mem::take).unwrap_or_default();
        for dst in old {
            if let Some(ins) = self.sources.get_mut(&dst) {
                ins.remove(src);
            }
        }
    }

    #[inline]
    fn scrub_incoming_only(&mut self, dst: &G) {
        let old = self.sources.get_mut(dst).map(std::mem::take).unwrap_or_default();
        for src in old {
            if let Some(outs) = self.targets.get_mut(&src) {
                outs.remove(dst);
            }
        }
    }
}

impl<G: GeneratorLike> ChainGraph for InMemoryGraph<G> {
    type Generator = G;
    type Neighbors<'a>
        = hash_set::Iter<'a, G>
    where
        Self: 'a;
    type Vertices<'a>
        = hash_map::Keys<'a, G, HashSet<G>>
    where
        Self: 'a;

    fn add_vertex(&mut self, g: G) {
        self.sources.entry(g.clone()).or_default();
        self.targets.entry(g).or_default();
    }

    fn contains(&self, g: &G) -> bool {
        self.targets.contains_key(g)
    }

    /// Adds the edge `v → w` to both adjacency maps.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::graph::{ChainGraph, InMemoryGraph};
    /// let mut g = InMemoryGraph::from_edges(['a', 'b'], []).unwrap();
    /// g.connect(&'a', &'b').unwrap();
    /// g.connect(&'a', &'b').unwrap();
    /// assert_eq!(g.edge_count(), 1);
    /// assert!(g.connect(&'a', &'a').is_err());
    /// ```
    fn connect(&mut self, v: &G, w: &G) -> Result<(), MorseError> {
        if v == w {
            return Err(MorseError::invalid_edge(v));
        }
        if !self.contains(v) {
            return Err(MorseError::not_found(v));
        }
        if !self.contains(w) {
            return Err(MorseError::not_found(w));
        }
        self.targets.entry(v.clone()).or_default().insert(w.clone());
        if let Some(ins) = self.sources.get_mut(w) {
            ins.insert(v.clone());
        }
        Ok(())
    }

    fn disconnect(&mut self, v: &G, w: &G) {
        if let Some(outs) = self.targets.get_mut(v) {
            outs.remove(w);
        }
        if let Some(ins) = self.sources.get_mut(w) {
            ins.remove(v);
        }
    }

    fn has_edge(&self, v: &G, w: &G) -> bool {
        self.targets.get(v).is_some_and(|outs| outs.contains(w))
    }

    fn remove(&mut self, v: &G) -> Result<(), MorseError> {
        if !self.contains(v) {
            return Err(MorseError::not_found(v));
        }
        self.scrub_outgoing_only(v);
        self.scrub_incoming_only(v);
        self.targets.remove(v);
        self.sources.remove(v);
        Ok(())
    }

    fn outgoing<'a>(&'a self, v: &G) -> Result<Self::Neighbors<'a>, MorseError> {
        self.targets
            .get(v)
            .map(|outs| outs.iter())
            .ok_or_else(|| MorseError::not_found(v))
    }

    fn incoming<'a>(&'a self, v: &G) -> Result<Self::Neighbors<'a>, MorseError> {
        self.sources
            .get(v)
            .map(|ins| ins.iter())
            .ok_or_else(|| MorseError::not_found(v))
    }

    fn out_degree(&self, v: &G) -> Result<usize, MorseError> {
        self.targets
            .get(v)
            .map(HashSet::len)
            .ok_or_else(|| MorseError::not_found(v))
    }

    fn in_degree(&self, v: &G) -> Result<usize, MorseError> {
        self.sources
            .get(v)
            .map(HashSet::len)
            .ok_or_else(|| MorseError::not_found(v))
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        self.targets.keys()
    }

    fn vertex_count(&self) -> usize {
        self.targets.len()
    }

    fn edge_count(&self) -> usize {
        self.targets.values().map(HashSet::len).sum()
    }
}

impl<G: GeneratorLike> DebugInvariants for InMemoryGraph<G> {
    fn validate_invariants(&self) -> Result<(), MorseError> {
        if self.targets.len() != self.sources.len()
            || self.targets.keys().any(|k| !self.sources.contains_key(k))
        {
            return Err(MorseError::BrokenMirror(
                "outgoing and incoming maps disagree on the vertex set".into(),
            ));
        }
        for (src, outs) in &self.targets {
            for dst in outs {
                if dst == src {
                    return Err(MorseError::BrokenMirror(format!("self-loop on {src:?}")));
                }
                let mirrored = self.sources.get(dst).is_some_and(|ins| ins.contains(src));
                if !mirrored {
                    return Err(MorseError::BrokenMirror(format!(
                        "missing mirror in[{dst:?}] for out edge ({src:?} -> {dst:?})"
                    )));
                }
            }
        }
        for (dst, ins) in &self.sources {
            for src in ins {
                let mirrored = self.targets.get(src).is_some_and(|outs| outs.contains(dst));
                if !mirrored {
                    return Err(MorseError::BrokenMirror(format!(
                        "missing mirror out[{src:?}] for in edge ({src:?} -> {dst:?})"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod graph_tests {
    use super::InMemoryGraph;
    use crate::debug_invariants::DebugInvariants;
    use crate::graph::ChainGraph;

    #[test]
    fn connect_and_disconnect() {
        let mut g = InMemoryGraph::<u32>::new();
        g.add_vertices([1, 2]);
        g.disconnect(&1, &2);
        g.connect(&1, &2).unwrap();
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
        g.disconnect(&1, &2);
        assert!(!g.has_edge(&1, &2));
        g.validate_invariants().unwrap();
    }

    #[test]
    fn outgoing_and_incoming() {
        let g = InMemoryGraph::from_edges([1u32, 2, 3], [(1, 2), (3, 2)]).unwrap();
        let mut ins: Vec<_> = g.incoming(&2).unwrap().copied().collect();
        ins.sort();
        assert_eq!(ins, vec![1, 3]);
        assert_eq!(g.out_degree(&2).unwrap(), 0);
        assert_eq!(g.in_degree(&1).unwrap(), 0);
    }

    #[test]
    fn connect_to_unknown_vertex_fails() {
        let mut g = InMemoryGraph::<u32>::new();
        g.add_vertex(1);
        assert!(g.connect(&1, &9).is_err());
        assert!(g.connect(&9, &1).is_err());
        assert_eq!(g.edge_count(), 0);
        g.validate_invariants().unwrap();
    }
}
