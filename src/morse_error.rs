//! MorseError: Unified error type for morse-homology public APIs
//!
//! Every fallible graph primitive, the cancellation engine and the rank
//! table aggregator report through this one enum, so callers can decide per
//! slice whether to abort the computation or skip the offending slice.

use thiserror::Error;

/// Unified error type for graph and reduction operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MorseError {
    /// Attempted to connect a vertex to itself.
    #[error("Invalid edge: self-loop on `{0}`")]
    InvalidEdge(String),
    /// Query or mutation against a vertex (or pivot edge) that is not live.
    #[error("Not found: `{0}` is not live in the graph")]
    NotFound(String),
    /// A slice handed to the reduction engine had no generators.
    #[error("Empty range: slice contains no generators")]
    EmptyRange,
    /// A failure while reducing one outer-degree slice.
    #[error("Slice at outer degree {outer_degree} failed: {source}")]
    Slice {
        outer_degree: i32,
        #[source]
        source: Box<MorseError>,
    },
    /// The arena cannot index another vertex.
    #[error("Capacity exceeded: vertex slot {0} does not fit a 32-bit index")]
    CapacityExceeded(usize),
    /// An outgoing entry without its incoming mirror (or the reverse), or an
    /// edge touching a dead vertex.
    #[error("Graph invariant broken: {0}")]
    BrokenMirror(String),
}

impl MorseError {
    pub(crate) fn invalid_edge<G: std::fmt::Debug>(g: &G) -> Self {
        MorseError::InvalidEdge(format!("{g:?}"))
    }

    pub(crate) fn not_found<G: std::fmt::Debug>(g: &G) -> Self {
        MorseError::NotFound(format!("{g:?}"))
    }

    /// Attach the outer degree of the slice that produced this error.
    pub fn in_slice(self, outer_degree: i32) -> Self {
        MorseError::Slice {
            outer_degree,
            source: Box::new(self),
        }
    }

    /// The underlying error with any slice context stripped.
    pub fn root(&self) -> &MorseError {
        match self {
            MorseError::Slice { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_context_keeps_root() {
        let e = MorseError::EmptyRange.in_slice(3);
        assert_eq!(e.root(), &MorseError::EmptyRange);
        assert!(e.to_string().contains("outer degree 3"));
    }

    #[test]
    fn messages_name_the_generator() {
        let e = MorseError::invalid_edge(&"x");
        assert_eq!(e.to_string(), "Invalid edge: self-loop on `\"x\"`");
    }
}
