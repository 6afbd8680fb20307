//! Structure extraction: a shallow "who assigns what" graph of one source file.

pub mod dot;
pub mod extractor;
pub mod graph;

pub use extractor::{extract, ExtractError};
pub use graph::{Graph, GraphEdge, GraphNode, MODULE_SCOPE};
