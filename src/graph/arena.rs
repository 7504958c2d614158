//! Arena-backed implementation of [`ChainGraph`].
//!
//! Vertices live in a dense `Vec` of [`VertexRecord`]s addressed by
//! [`VertexIndex`]; a side map resolves generator identity to index. Removal
//! tombstones the record (`alive = false`) and drops it from the side map,
//! so indices held anywhere else stay in bounds. Neighbor sets are ordered
//! by index, which makes neighbor iteration follow insertion order and keeps
//! intermediate states of a reduction reproducible.

use std::collections::{BTreeSet, btree_set};

use hashbrown::HashMap;

use super::bounds::GeneratorLike;
use super::graph_trait::ChainGraph;
use super::vertex::{VertexIndex, VertexRecord};
use crate::debug_invariants::DebugInvariants;
use crate::morse_error::MorseError;

/// Dense arena graph with tombstoned removal.
#[derive(Clone, Debug)]
pub struct ArenaGraph<G>
where
    G: GeneratorLike,
{
    records: Vec<VertexRecord<G>>,
    index_of: HashMap<G, VertexIndex>,
}

impl<G: GeneratorLike> Default for ArenaGraph<G> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index_of: HashMap::new(),
        }
    }
}

impl<G: GeneratorLike> ArenaGraph<G> {
    /// Creates a new, empty `ArenaGraph`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate room for `n` vertices.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
            index_of: HashMap::with_capacity(n),
        }
    }

    /// Build a graph from vertices and edges.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::graph::{ArenaGraph, ChainGraph};
    /// let g = ArenaGraph::from_edges([1, 2, 3], [(1, 2), (1, 3)]).unwrap();
    /// assert_eq!(g.out_degree(&1).unwrap(), 2);
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

    /// Index of a live generator.
    #[inline]
    pub fn index(&self, g: &G) -> Option<VertexIndex> {
        self.index_of.get(g).copied()
    }

    /// Generator stored at `idx`, if that record is still live.
    pub fn generator(&self, idx: VertexIndex) -> Option<&G> {
        self.records
            .get(idx.slot())
            .filter(|r| r.alive)
            .map(|r| &r.generator)
    }

    /// Number of arena slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.records.len()
    }

    /// Read-only view of every record, tombstones included.
    pub fn records(&self) -> &[VertexRecord<G>] {
        &self.records
    }

    #[inline]
    fn lookup(&self, g: &G) -> Result<VertexIndex, MorseError> {
        self.index(g).ok_or_else(|| MorseError::not_found(g))
    }

    #[inline]
    fn record_mut(&mut self, idx: VertexIndex) -> &mut VertexRecord<G> {
        &mut self.records[idx.slot()]
    }

    fn neighbors<'a>(&'a self, set: &'a BTreeSet<VertexIndex>) -> ArenaNeighbors<'a, G> {
        ArenaNeighbors {
            inner: set.iter(),
            records: &self.records,
        }
    }
}

/// Iterator over a neighbor set, resolving indices to generators.
pub struct ArenaNeighbors<'a, G> {
    inner: btree_set::Iter<'a, VertexIndex>,
    records: &'a [VertexRecord<G>],
}

impl<'a, G> Iterator for ArenaNeighbors<'a, G> {
    type Item = &'a G;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let records = self.records;
        self.inner.next().map(|i| &records[i.slot()].generator)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<G> ExactSizeIterator for ArenaNeighbors<'_, G> {}

type LiveIter<'a, G> = std::iter::FilterMap<
    std::slice::Iter<'a, VertexRecord<G>>,
    fn(&'a VertexRecord<G>) -> Option<&'a G>,
>;

impl<G: GeneratorLike> ChainGraph for ArenaGraph<G> {
    type Generator = G;
    type Neighbors<'a>
        = ArenaNeighbors<'a, G>
    where
        Self: 'a;
    type Vertices<'a>
        = LiveIter<'a, G>
    where
        Self: 'a;

    /// Inserts a vertex, reusing nothing from tombstoned slots.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::graph::{ArenaGraph, ChainGraph};
    /// let mut g = ArenaGraph::new();
    /// g.add_vertex("x");
    /// g.add_vertex("x");
    /// assert_eq!(g.vertex_count(), 1);
    /// ```
    ///
    /// # Panics
    /// If the arena already holds `u32::MAX + 1` slots; use
    /// [`try_add_vertex`](ChainGraph::try_add_vertex) to get an error instead.
    fn add_vertex(&mut self, g: G) {
        if let Err(e) = self.try_add_vertex(g) {
            panic!("{e}");
        }
    }

    fn try_add_vertex(&mut self, g: G) -> Result<(), MorseError> {
        if self.index_of.contains_key(&g) {
            return Ok(());
        }
        let idx = VertexIndex::try_from_slot(self.records.len())?;
        self.records.push(VertexRecord::new(g.clone()));
        self.index_of.insert(g, idx);
        Ok(())
    }

    fn contains(&self, g: &G) -> bool {
        self.index_of.contains_key(g)
    }

    fn connect(&mut self, v: &G, w: &G) -> Result<(), MorseError> {
        if v == w {
            return Err(MorseError::invalid_edge(v));
        }
        let vi = self.lookup(v)?;
        let wi = self.lookup(w)?;
        self.record_mut(vi).targets.insert(wi);
        self.record_mut(wi).sources.insert(vi);
        Ok(())
    }

    fn disconnect(&mut self, v: &G, w: &G) {
        let (Some(vi), Some(wi)) = (self.index(v), self.index(w)) else {
            return;
        };
        self.record_mut(vi).targets.remove(&wi);
        self.record_mut(wi).sources.remove(&vi);
    }

    fn has_edge(&self, v: &G, w: &G) -> bool {
        match (self.index(v), self.index(w)) {
            (Some(vi), Some(wi)) => self.records[vi.slot()].targets.contains(&wi),
            _ => false,
        }
    }

    /// Removes `v`, leaving a tombstone behind.
    ///
    /// # Example
    /// ```rust
    /// use morse_homology::graph::{ArenaGraph, ChainGraph};
    /// let mut g = ArenaGraph::from_edges([1, 2], [(1, 2)]).unwrap();
    /// g.remove(&2).unwrap();
    /// assert_eq!(g.out_degree(&1).unwrap(), 0);
    /// assert!(g.outgoing(&2).is_err());
    /// assert_eq!(g.slot_count(), 2);
    /// ```
    fn remove(&mut self, v: &G) -> Result<(), MorseError> {
        let idx = self
            .index_of
            .remove(v)
            .ok_or_else(|| MorseError::not_found(v))?;
        let rec = self.record_mut(idx);
        rec.alive = false;
        let targets = std::mem::take(&mut rec.targets);
        let sources = std::mem::take(&mut rec.sources);
        for w in targets {
            self.record_mut(w).sources.remove(&idx);
        }
        for u in sources {
            self.record_mut(u).targets.remove(&idx);
        }
        Ok(())
    }

    fn outgoing<'a>(&'a self, v: &G) -> Result<Self::Neighbors<'a>, MorseError> {
        let idx = self.lookup(v)?;
        Ok(self.neighbors(&self.records[idx.slot()].targets))
    }

    fn incoming<'a>(&'a self, v: &G) -> Result<Self::Neighbors<'a>, MorseError> {
        let idx = self.lookup(v)?;
        Ok(self.neighbors(&self.records[idx.slot()].sources))
    }

    fn out_degree(&self, v: &G) -> Result<usize, MorseError> {
        Ok(self.records[self.lookup(v)?.slot()].targets.len())
    }

    fn in_degree(&self, v: &G) -> Result<usize, MorseError> {
        Ok(self.records[self.lookup(v)?.slot()].sources.len())
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        fn live<G>(r: &VertexRecord<G>) -> Option<&G> {
            r.alive.then_some(&r.generator)
        }
        let f: fn(&VertexRecord<G>) -> Option<&G> = live::<G>;
        self.records.iter().filter_map(f)
    }

    fn vertex_count(&self) -> usize {
        self.index_of.len()
    }

    fn edge_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.alive)
            .map(|r| r.targets.len())
            .sum()
    }
}

impl<G: GeneratorLike> DebugInvariants for ArenaGraph<G> {
    fn validate_invariants(&self) -> Result<(), MorseError> {
        for (g, idx) in &self.index_of {
            let fresh = self
                .records
                .get(idx.slot())
                .is_some_and(|r| r.alive && &r.generator == g);
            if !fresh {
                return Err(MorseError::BrokenMirror(format!(
                    "index map entry {g:?} -> {idx} is stale"
                )));
            }
        }
        let mut live = 0usize;
        for (slot, rec) in self.records.iter().enumerate() {
            let idx = VertexIndex::try_from_slot(slot)?;
            if !rec.alive {
                if !rec.targets.is_empty() || !rec.sources.is_empty() {
                    return Err(MorseError::BrokenMirror(format!(
                        "dead vertex {:?} still has neighbors",
                        rec.generator
                    )));
                }
                continue;
            }
            live += 1;
            for &w in &rec.targets {
                if w == idx {
                    return Err(MorseError::BrokenMirror(format!(
                        "self-loop on {:?}",
                        rec.generator
                    )));
                }
                let other = &self.records[w.slot()];
                if !other.alive || !other.sources.contains(&idx) {
                    return Err(MorseError::BrokenMirror(format!(
                        "edge {:?} -> {:?} has no live incoming mirror",
                        rec.generator, other.generator
                    )));
                }
            }
            for &u in &rec.sources {
                let other = &self.records[u.slot()];
                if !other.alive || !other.targets.contains(&idx) {
                    return Err(MorseError::BrokenMirror(format!(
                        "edge {:?} -> {:?} has no live outgoing mirror",
                        other.generator, rec.generator
                    )));
                }
            }
        }
        if live != self.index_of.len() {
            return Err(MorseError::BrokenMirror(format!(
                "{live} live records but {} indexed generators",
                self.index_of.len()
            )));
        }
        Ok(())
    }

    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "ArenaGraph");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstones_keep_slots_and_drop_identity() {
        let mut g = ArenaGraph::from_edges(["a", "b", "c"], [("a", "b"), ("b", "c")]).unwrap();
        let b = g.index(&"b").unwrap();
        g.remove(&"b").unwrap();
        assert_eq!(g.slot_count(), 3);
        assert_eq!(g.vertex_count(), 2);
        assert!(g.generator(b).is_none());
        assert!(!g.records()[b.slot()].is_alive());
        assert_eq!(g.edge_count(), 0);
        g.validate_invariants().unwrap();
    }

    #[test]
    fn re_adding_a_removed_generator_takes_a_fresh_slot() {
        let mut g = ArenaGraph::new();
        g.add_vertex(5u32);
        let first = g.index(&5).unwrap();
        g.remove(&5).unwrap();
        g.add_vertex(5);
        let second = g.index(&5).unwrap();
        assert_ne!(first, second);
        assert_eq!(g.generator(second), Some(&5));
        g.validate_invariants().unwrap();
    }

    #[test]
    fn vertices_follow_insertion_order() {
        let mut g = ArenaGraph::new();
        g.add_vertices([30u32, 10, 20]);
        let vs: Vec<_> = g.vertices().copied().collect();
        assert_eq!(vs, vec![30, 10, 20]);
        assert_eq!(g.vertices_sorted(), vec![10, 20, 30]);
    }

    #[test]
    fn neighbors_report_exact_size() {
        let g = ArenaGraph::from_edges([1u32, 2, 3], [(1, 2), (1, 3)]).unwrap();
        assert_eq!(g.outgoing(&1).unwrap().len(), 2);
        assert_eq!(g.incoming(&3).unwrap().len(), 1);
    }

    #[test]
    fn validate_detects_broken_mirror() {
        let mut g = ArenaGraph::from_edges([1u32, 2], [(1, 2)]).unwrap();
        let two = g.index(&2).unwrap();
        g.record_mut(two).sources.clear();
        assert!(matches!(
            g.validate_invariants(),
            Err(MorseError::BrokenMirror(_))
        ));
    }
}
