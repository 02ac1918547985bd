//! CX aspect element types: nodes, edges, visual properties, cartesian layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Aspect names ────────────────────────────────────────────────────────────

pub const NODES_ASPECT: &str = "nodes";
pub const EDGES_ASPECT: &str = "edges";
pub const VISUAL_PROPERTIES_ASPECT: &str = "cyVisualProperties";
pub const CARTESIAN_LAYOUT_ASPECT: &str = "cartesianLayout";

/// `properties_of` value of the entry holding network-wide node defaults.
pub const NODES_DEFAULT: &str = "nodes:default";

/// Visual property keys that contribute to the default node size.
pub const NODE_SIZE_KEYS: [&str; 3] = ["NODE_WIDTH", "NODE_HEIGHT", "NODE_SIZE"];

// ─── Elements ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CxNode {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub represents: Option<String>,
}

impl CxNode {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            represents: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CxEdge {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "s")]
    pub source: i64,
    #[serde(rename = "t")]
    pub target: i64,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
}

impl CxEdge {
    pub fn new(id: i64, source: i64, target: i64) -> Self {
        Self {
            id,
            source,
            target,
            interaction: None,
        }
    }
}

/// One entry of the `cyVisualProperties` aspect.
///
/// Cytoscape writes every property value as a string; numbers are accepted
/// too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPropertyEntry {
    pub properties_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<i64>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl VisualPropertyEntry {
    /// Numeric value of a property, `None` when absent or not a number.
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        match self.properties.get(key)? {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }
}

/// One element of the `cartesianLayout` aspect written to standard out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianLayoutEntry {
    pub node: i64,
    pub x: f64,
    pub y: f64,
}
