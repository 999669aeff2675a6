//! statgrow Rust Extensions
//!
//! Seeded region growing over per-cell statistics, implemented in Rust
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Grid Format
//! All inputs are 2D grids of shape (height, width):
//! - **Mean**: `f64` per cell, the statistic compared against a region's running average
//! - **Dispersion**: `f64` per cell (standard deviation or similar); NaN marks unusable cells
//! - **Labels** (output): `u32` per cell, 0 = unlabeled, `i` = region grown from the i-th seed
//!
//! Seeds are (row, col) pairs. Their order is the labeling priority, so
//! callers normally sort them by ascending dispersion first
//! (see [`segmentation::seeds_by_dispersion`]).
//!
//! ## Example
//! ```
//! use ndarray::Array2;
//! use statgrow::segmentation::{grow_regions, GrowOptions};
//!
//! let mean = Array2::from_elem((3, 3), 1.0);
//! let dispersion = Array2::<f64>::zeros((3, 3));
//! let options = GrowOptions::new(0.5, 1.0);
//!
//! let labels = grow_regions(mean.view(), dispersion.view(), &[(1, 1)], &options).unwrap();
//! assert!(labels.iter().all(|&l| l == 1));
//! ```

pub mod error;
pub mod segmentation;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{GrowError, GrowResult};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array2;
    use numpy::{AllowTypeChange, IntoPyArray, PyArray2, PyArrayLike2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::GrowError;
    use crate::segmentation::{
        checked_overwrite_limit, grow_regions, region_populations, seeds_by_dispersion,
        seeds_from_array, seeds_to_array, GrowOptions,
    };

    impl From<GrowError> for PyErr {
        fn from(err: GrowError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Region Growing
    // ========================================================================

    /// Label regions grown from seed points.
    ///
    /// A neighbouring cell joins the growing region if its mean lies within
    /// `mean_comb` of the region's running mean (inclusive) and its std is
    /// below `std_threshold`. Cells of an earlier region with at most
    /// `overwrite` cells may be taken over.
    ///
    /// # Arguments
    /// * `mean_array` - 2D mean values (any float dtype, converted to float64)
    /// * `std_array` - 2D standard deviations, same shape (NaN allowed)
    /// * `seed_array` - Integer array of shape (N, 2) with (row, col) seeds in priority order
    /// * `mean_comb` - Acceptance window half-width
    /// * `std_threshold` - Dispersion limit
    /// * `diagonal` - Also grow into diagonal neighbours
    /// * `overwrite` - Largest earlier region that may lose cells
    ///
    /// # Returns
    /// uint32 label array, 0 = unlabeled
    #[pyfunction]
    #[pyo3(signature = (
        mean_array, std_array, seed_array, mean_comb, std_threshold, diagonal=true, overwrite=20
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn region_growing<'py>(
        py: Python<'py>,
        mean_array: PyArrayLike2<'py, f64, AllowTypeChange>,
        std_array: PyArrayLike2<'py, f64, AllowTypeChange>,
        seed_array: PyArrayLike2<'py, i64, AllowTypeChange>,
        mean_comb: f64,
        std_threshold: f64,
        diagonal: bool,
        overwrite: i64,
    ) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let seeds = seeds_from_array(seed_array.as_array())?;
        let options = GrowOptions::new(mean_comb, std_threshold)
            .with_diagonal(diagonal)
            .with_overwrite_limit(checked_overwrite_limit(overwrite)?);

        let labels = grow_regions(mean_array.as_array(), std_array.as_array(), &seeds, &options)?;
        Ok(labels.into_pyarray(py))
    }

    /// Seeds for every non-NaN std cell, ordered by ascending std.
    ///
    /// # Returns
    /// int64 array of shape (N, 2) with (row, col) rows
    #[pyfunction]
    pub fn seeds_by_std<'py>(
        py: Python<'py>,
        std_array: PyArrayLike2<'py, f64, AllowTypeChange>,
    ) -> Bound<'py, PyArray2<i64>> {
        let seeds = seeds_by_dispersion(std_array.as_array());
        seeds_to_array(&seeds).into_pyarray(py)
    }

    /// Cell count for every label present, in ascending label order.
    ///
    /// # Returns
    /// uint64 array of shape (N, 2) with (label, count) rows; label 0 is unlabeled
    #[pyfunction]
    pub fn region_sizes<'py>(
        py: Python<'py>,
        labels: PyReadonlyArray2<'py, u32>,
    ) -> Bound<'py, PyArray2<u64>> {
        let populations = region_populations(labels.as_array());
        let mut out = Array2::<u64>::zeros((populations.len(), 2));
        for (i, (label, count)) in populations.into_iter().enumerate() {
            out[[i, 0]] = u64::from(label);
            out[[i, 1]] = count as u64;
        }
        out.into_pyarray(py)
    }

    /// statgrow Rust extension module
    #[pymodule]
    pub fn statgrow(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(region_growing, m)?)?;
        m.add_function(wrap_pyfunction!(seeds_by_std, m)?)?;
        m.add_function(wrap_pyfunction!(region_sizes, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::statgrow;
