//! WASM bindings for cdgraphlayout.
//!
//! Exposes `layout` and `layoutWithOptions` to JavaScript via wasm-bindgen.
//! Both take a CX document as a JSON string and return the cartesianLayout
//! aspect as a JSON string.

use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::cx::CxNetwork;
use crate::layout::{BoundingBox, LayoutAlgorithm};

fn run(cx_json: &str, config: &LayoutConfig) -> crate::Result<String> {
    let network: CxNetwork = cx_json.parse()?;
    let entries = crate::compute_cartesian_layout(&network, config)?;
    Ok(serde_json::to_string(&entries)?)
}

/// Lay out a CX document with the named algorithm ("" = auto).
#[wasm_bindgen]
pub fn layout(cx_json: &str, algorithm: &str) -> Result<String, JsError> {
    layout_with_options(cx_json, algorithm, None, "", None)
}

/// Lay out a CX document with full control over options.
///
/// - `algorithm`: "auto", "circle", "drl", "fr", "kk", "lgl", "random",
///   "rt", "rt_circular", or empty string for auto
/// - `scale`: optional factor applied to the final coordinates
/// - `fit_into`: "x1,y1,x2,y2", or empty string for the node-size box
/// - `seed`: optional seed for the randomised algorithms
#[wasm_bindgen(js_name = "layoutWithOptions")]
pub fn layout_with_options(
    cx_json: &str,
    algorithm: &str,
    scale: Option<f64>,
    fit_into: &str,
    seed: Option<u64>,
) -> Result<String, JsError> {
    let algorithm = if algorithm.is_empty() {
        LayoutAlgorithm::Auto
    } else {
        algorithm.parse().map_err(|e: crate::LayoutError| JsError::new(&e.to_string()))?
    };
    let fit_into = if fit_into.is_empty() {
        None
    } else {
        Some(BoundingBox::from_user_str(fit_into).map_err(|e| JsError::new(&e.to_string()))?)
    };
    let config = LayoutConfig {
        algorithm,
        scale,
        fit_into,
        seed,
    };
    run(cx_json, &config).map_err(|e| JsError::new(&e.to_string()))
}
