//! CxNetwork — the subset of a CX document a layout needs.
//!
//! A CX document is a JSON array of aspect fragments, each a single-key
//! object mapping an aspect name to a list of elements. Fragments of the
//! same aspect may appear several times and are concatenated in order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::{
    CxEdge, CxNode, EDGES_ASPECT, NODE_SIZE_KEYS, NODES_ASPECT, NODES_DEFAULT,
    VISUAL_PROPERTIES_ASPECT, VisualPropertyEntry,
};
use crate::error::{LayoutError, Result};
use crate::layout::types::BoundingBox;

/// Smallest edge length of the square a sized network is fitted into.
pub const MIN_BOUNDING_BOX_SIZE: f64 = 550.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CxNetwork {
    pub nodes: Vec<CxNode>,
    pub edges: Vec<CxEdge>,
    /// `None` when the document carries no `cyVisualProperties` aspect.
    pub visual_properties: Option<Vec<VisualPropertyEntry>>,
}

impl CxNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Value = serde_json::from_reader(BufReader::new(reader))?;
        Self::from_value(doc)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Build from an already decoded CX document.
    pub fn from_value(doc: Value) -> Result<Self> {
        let Value::Array(fragments) = doc else {
            return Err(LayoutError::cx("top level must be a JSON array"));
        };

        let mut net = Self::new();
        for (pos, fragment) in fragments.into_iter().enumerate() {
            let Value::Object(aspects) = fragment else {
                return Err(LayoutError::cx(format!(
                    "fragment {pos} is not a JSON object"
                )));
            };
            for (name, elements) in aspects {
                match name.as_str() {
                    NODES_ASPECT => net.nodes.extend(decode_elements::<CxNode>(&name, elements)?),
                    EDGES_ASPECT => net.edges.extend(decode_elements::<CxEdge>(&name, elements)?),
                    VISUAL_PROPERTIES_ASPECT => net
                        .visual_properties
                        .get_or_insert_with(Vec::new)
                        .extend(decode_elements::<VisualPropertyEntry>(&name, elements)?),
                    _ => {}
                }
            }
        }

        debug!(
            nodes = net.nodes.len(),
            edges = net.edges.len(),
            visual_properties = net.visual_properties.is_some(),
            "parsed CX network"
        );
        Ok(net)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Largest of the default node width, height and size.
    ///
    /// Read from the first `nodes:default` visual property entry; keys that
    /// are missing or not numeric are skipped.
    pub fn default_node_size(&self) -> Option<f64> {
        let entry = self
            .visual_properties
            .as_ref()?
            .iter()
            .find(|e| e.properties_of == NODES_DEFAULT)?;

        NODE_SIZE_KEYS
            .iter()
            .filter_map(|key| entry.property_f64(key))
            .reduce(f64::max)
    }

    /// Square box big enough to hold every node at its default size.
    ///
    /// The edge length is `sqrt(size² · node_count)`, but never less than
    /// [`MIN_BOUNDING_BOX_SIZE`].
    pub fn bounding_box_from_node_size(&self) -> Option<BoundingBox> {
        let n_size = self.default_node_size()?;
        let side = (n_size * n_size * self.node_count() as f64)
            .sqrt()
            .max(MIN_BOUNDING_BOX_SIZE);
        Some(BoundingBox::new(0.0, 0.0, side, side))
    }
}

fn decode_elements<T: DeserializeOwned>(aspect: &str, elements: Value) -> Result<Vec<T>> {
    if !elements.is_array() {
        return Err(LayoutError::cx(format!("aspect '{aspect}' is not a list")));
    }
    serde_json::from_value(elements)
        .map_err(|e| LayoutError::cx(format!("bad element in aspect '{aspect}': {e}")))
}

/// Parse a CX document held in memory.
impl FromStr for CxNetwork {
    type Err = LayoutError;

    fn from_str(src: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(src)?;
        Self::from_value(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_cx_network.rs"]
mod tests;
