pub mod directed;
pub mod generators;
pub mod payload;
pub mod traits;

pub use directed::{DirectedGraph, Vertex};
pub use payload::PayloadGraph;
pub use traits::{EdgeRef, Graph, MutableGraph, VertexKey};
