//! cdgraphlayout — runs graph layout algorithms on CX networks.
//!
//! Public API: `compute_cartesian_layout()` and `run_layout()`.
//!
//! Pipeline: CX document → `CxNetwork` → `LayoutGraph` → `Layout`
//! → mirrored, fitted and scaled → `cartesianLayout` entries.

pub mod config;
pub mod cx;
pub mod error;
pub mod layout;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

pub use crate::config::LayoutConfig;
pub use crate::cx::{CartesianLayoutEntry, CxNetwork};
pub use crate::error::{LayoutError, Result};
pub use crate::layout::{BoundingBox, Layout, LayoutAlgorithm, LayoutGraph};

/// Version string baked in by build.rs.
pub const VERSION: &str = env!("CDGRAPHLAYOUT_VERSION");

/// Lay out `network` and return one `cartesianLayout` entry per node, in
/// the order of the network's `nodes` aspect.
///
/// The layout is flipped vertically, then fitted into `config.fit_into`
/// (or, failing that, the box derived from the default node size), then
/// multiplied by `config.scale`, which must be finite.
pub fn compute_cartesian_layout(
    network: &CxNetwork,
    config: &LayoutConfig,
) -> Result<Vec<CartesianLayoutEntry>> {
    if let Some(scale) = config.scale.filter(|s| !s.is_finite()) {
        return Err(LayoutError::InvalidScale(scale));
    }
    let bbox = config
        .fit_into
        .or_else(|| network.bounding_box_from_node_size());

    let graph = LayoutGraph::from_cx(network);
    let mut rng = config.rng();
    let mut layout = layout::compute(&graph, config.algorithm, &mut rng);

    layout.mirror_y();
    if let Some(bbox) = bbox {
        debug!(bbox = ?bbox.coords(), "fitting layout");
        layout.fit_into(&bbox, true);
    }
    if let Some(scale) = config.scale {
        layout.scale(scale);
    }

    Ok(graph
        .node_ids()
        .into_iter()
        .zip(layout.coords)
        .map(|(node, p)| CartesianLayoutEntry { node, x: p.x, y: p.y })
        .collect())
}

/// Lay out the CX file at `input` and write the `cartesianLayout` aspect
/// as JSON to `out`.
pub fn run_layout<W: Write>(input: &Path, config: &LayoutConfig, mut out: W) -> Result<()> {
    let meta = fs::metadata(input).ok().filter(|m| m.is_file());
    let Some(meta) = meta else {
        return Err(LayoutError::NotAFile {
            path: input.to_path_buf(),
        });
    };
    if meta.len() == 0 {
        return Err(LayoutError::EmptyFile {
            path: input.to_path_buf(),
        });
    }

    let network = CxNetwork::from_path(input)?;
    let entries = compute_cartesian_layout(&network, config)?;
    serde_json::to_writer(&mut out, &entries)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/rust/test_pipeline.rs"]
mod tests;
