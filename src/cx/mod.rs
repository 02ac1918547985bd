//! CX network exchange format: input model and the cartesianLayout output.

pub mod network;
pub mod types;

pub use network::CxNetwork;
pub use types::{CartesianLayoutEntry, CxEdge, CxNode, VisualPropertyEntry};
