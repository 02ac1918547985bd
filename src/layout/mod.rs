//! Layout engine — algorithm selection and dispatch.
//!
//! Every algorithm returns one point per node of the [`LayoutGraph`], in
//! node order. Randomised algorithms draw from the caller's RNG so a seeded
//! RNG gives a reproducible layout.

pub mod basic;
pub mod drl;
pub mod fr;
pub mod graph;
pub mod kk;
pub mod lgl;
pub mod tree;
pub mod types;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::debug;

use crate::error::LayoutError;

pub use graph::LayoutGraph;
pub use types::{BoundingBox, Layout, Point};

/// Largest connected graph `auto` hands to Kamada-Kawai.
pub const AUTO_KK_MAX_NODES: usize = 100;
/// Largest graph `auto` hands to Fruchterman-Reingold; bigger ones use DrL.
pub const AUTO_FR_MAX_NODES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LayoutAlgorithm {
    /// Pick kk, fr or drl from the graph size and connectivity
    #[default]
    Auto,
    /// Nodes evenly spaced on the unit circle
    Circle,
    /// DrL force-directed layout for large graphs
    Drl,
    /// Fruchterman-Reingold force-directed layout
    Fr,
    /// Kamada-Kawai spring layout
    Kk,
    /// Large Graph Layout
    Lgl,
    /// Uniformly random positions
    Random,
    /// Reingold-Tilford tree layout
    Rt,
    /// Reingold-Tilford tree layout in polar coordinates
    #[cfg_attr(feature = "cli", value(name = "rt_circular"))]
    RtCircular,
}

impl LayoutAlgorithm {
    pub const ALL: [LayoutAlgorithm; 9] = [
        Self::Auto,
        Self::Circle,
        Self::Drl,
        Self::Fr,
        Self::Kk,
        Self::Lgl,
        Self::Random,
        Self::Rt,
        Self::RtCircular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Circle => "circle",
            Self::Drl => "drl",
            Self::Fr => "fr",
            Self::Kk => "kk",
            Self::Lgl => "lgl",
            Self::Random => "random",
            Self::Rt => "rt",
            Self::RtCircular => "rt_circular",
        }
    }

    /// The concrete algorithm `auto` stands for on `graph`.
    pub fn resolve(self, graph: &LayoutGraph) -> Self {
        if self != Self::Auto {
            return self;
        }
        let n = graph.node_count();
        if n <= AUTO_KK_MAX_NODES && graph.is_connected() {
            Self::Kk
        } else if n <= AUTO_FR_MAX_NODES {
            Self::Fr
        } else {
            Self::Drl
        }
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| LayoutError::UnknownAlgorithm(s.to_string()))
    }
}

/// Run `algorithm` on `graph`.
pub fn compute<R: Rng + ?Sized>(
    graph: &LayoutGraph,
    algorithm: LayoutAlgorithm,
    rng: &mut R,
) -> Layout {
    let resolved = algorithm.resolve(graph);
    debug!(
        requested = %algorithm,
        algorithm = %resolved,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "running layout"
    );
    match resolved {
        LayoutAlgorithm::Circle => basic::circle(graph),
        LayoutAlgorithm::Random => basic::random(graph, rng),
        LayoutAlgorithm::Fr => fr::fruchterman_reingold(graph, rng),
        // Auto has already been resolved to a concrete algorithm.
        LayoutAlgorithm::Kk | LayoutAlgorithm::Auto => kk::kamada_kawai(graph),
        LayoutAlgorithm::Drl => drl::drl(graph, rng),
        LayoutAlgorithm::Lgl => lgl::lgl(graph, rng),
        LayoutAlgorithm::Rt => tree::reingold_tilford(graph),
        LayoutAlgorithm::RtCircular => tree::reingold_tilford_circular(graph),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_algorithms.rs"]
mod tests;
