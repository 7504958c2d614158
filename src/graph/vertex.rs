//! `VertexIndex`: a stable, owned handle into the vertex arena
//!
//! The arena never moves or reuses a slot once it is handed out; removal
//! only flips the record's `alive` flag. An index therefore stays valid (if
//! possibly dead) for the whole lifetime of its graph, and all mutation goes
//! through the graph that owns the records.

use std::collections::BTreeSet;
use std::fmt;

use crate::morse_error::MorseError;

/// Dense index of a vertex record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VertexIndex(u32);

impl VertexIndex {
    /// Handle for arena slot `slot`.
    ///
    /// # Errors
    /// [`MorseError::CapacityExceeded`] if `slot` does not fit in a `u32`.
    #[inline]
    pub(crate) fn try_from_slot(slot: usize) -> Result<Self, MorseError> {
        u32::try_from(slot)
            .map(VertexIndex)
            .map_err(|_| MorseError::CapacityExceeded(slot))
    }

    /// Position of the record in the arena.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexIndex").field(&self.0).finish()
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena slot: a generator plus its mirrored neighbor sets.
#[derive(Clone, Debug)]
pub struct VertexRecord<G> {
    pub(crate) generator: G,
    /// Outgoing neighbors.
    pub(crate) targets: BTreeSet<VertexIndex>,
    /// Incoming neighbors.
    pub(crate) sources: BTreeSet<VertexIndex>,
    pub(crate) alive: bool,
}

impl<G> VertexRecord<G> {
    pub(crate) fn new(generator: G) -> Self {
        Self {
            generator,
            targets: BTreeSet::new(),
            sources: BTreeSet::new(),
            alive: true,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn targets(&self) -> &BTreeSet<VertexIndex> {
        &self.targets
    }

    pub fn sources(&self) -> &BTreeSet<VertexIndex> {
        &self.sources
    }
}
