//! Directed chain graphs.
//!
//! This module provides the graph abstraction the reduction engine mutates:
//! - [`ChainGraph`]: the trait every backend implements
//! - [`ArenaGraph`]: dense arena with stable index handles and tombstoned removal
//! - [`InMemoryGraph`]: hash map of neighbor sets keyed by generator
//!
//! Both backends behave identically through the trait; the arena is the
//! default for reductions.

pub mod arena;
pub mod bounds;
pub mod graph_trait;
pub mod in_memory;
pub mod vertex;

pub use arena::ArenaGraph;
pub use bounds::GeneratorLike;
pub use graph_trait::ChainGraph;
pub use in_memory::InMemoryGraph;
pub use vertex::{VertexIndex, VertexRecord};
