//! WebAssembly exports for statgrow.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Grids are passed as flat row-major buffers (length = width * height).
//! Seeds are passed as a flat `[row, col, row, col, ...]` buffer.
//! Contract violations are returned as JavaScript errors carrying the message.

use wasm_bindgen::prelude::*;

use crate::error::GrowError;
use crate::segmentation::{grow_regions_flat, seeds_by_dispersion_flat, GrowOptions};

fn to_js(err: GrowError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Region Growing
// ============================================================================

/// Label regions grown from seed points.
///
/// # Arguments
/// * `mean` - Flat mean values (length = width * height)
/// * `dispersion` - Flat dispersion values, same length (NaN allowed)
/// * `width` - Grid width
/// * `height` - Grid height
/// * `seeds` - Flat (row, col) pairs in priority order
/// * `tolerance` - Acceptance window half-width
/// * `dispersion_limit` - Cells at or above this dispersion never join a region
/// * `diagonal` - Also grow into diagonal neighbours
/// * `overwrite_limit` - Largest earlier region that may lose cells
///
/// # Returns
/// Flat label buffer, 0 = unlabeled
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn region_grow_wasm(
    mean: &[f64],
    dispersion: &[f64],
    width: usize,
    height: usize,
    seeds: &[u32],
    tolerance: f64,
    dispersion_limit: f64,
    diagonal: bool,
    overwrite_limit: u32,
) -> Result<Vec<u32>, JsValue> {
    let options = GrowOptions::new(tolerance, dispersion_limit)
        .with_diagonal(diagonal)
        .with_overwrite_limit(overwrite_limit as usize);

    grow_regions_flat(mean, dispersion, width, height, seeds, &options).map_err(to_js)
}

/// Seeds for every non-NaN dispersion cell, ordered by ascending dispersion.
///
/// # Returns
/// Flat (row, col) pairs
#[wasm_bindgen]
pub fn seeds_by_dispersion_wasm(
    dispersion: &[f64],
    width: usize,
    height: usize,
) -> Result<Vec<u32>, JsValue> {
    seeds_by_dispersion_flat(dispersion, width, height).map_err(to_js)
}
