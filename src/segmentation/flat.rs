//! Region growing over flat row-major buffers.
//!
//! Front ends without an array type (wasm) pass grids as `&[f64]` of length
//! width * height and seeds as `[row, col, row, col, ...]`.

use ndarray::ArrayView2;

use crate::error::{GrowError, GrowResult};
use crate::segmentation::region_grow::{grow_regions, GrowOptions};
use crate::segmentation::seeds::{seeds_by_dispersion, seeds_from_flat};

/// View a flat row-major buffer as a (height, width) grid.
pub fn grid_view<'a>(
    name: &'static str,
    data: &'a [f64],
    width: usize,
    height: usize,
) -> GrowResult<ArrayView2<'a, f64>> {
    let expected = width
        .checked_mul(height)
        .ok_or(GrowError::GridTooLarge { width, height })?;
    if data.len() != expected {
        return Err(GrowError::InvalidBuffer {
            name,
            expected,
            actual: data.len(),
        });
    }
    ArrayView2::from_shape((height, width), data).map_err(|_| GrowError::InvalidBuffer {
        name,
        expected,
        actual: data.len(),
    })
}

/// Grow regions on flat buffers, returning the flat label buffer.
pub fn grow_regions_flat(
    mean: &[f64],
    dispersion: &[f64],
    width: usize,
    height: usize,
    seeds: &[u32],
    options: &GrowOptions,
) -> GrowResult<Vec<u32>> {
    let mean = grid_view("mean", mean, width, height)?;
    let dispersion = grid_view("dispersion", dispersion, width, height)?;
    let seeds = seeds_from_flat(seeds)?;

    let labels = grow_regions(mean, dispersion, &seeds, options)?;
    Ok(labels.into_raw_vec_and_offset().0)
}

/// Seeds ordered by ascending dispersion, as flat (row, col) pairs.
pub fn seeds_by_dispersion_flat(
    dispersion: &[f64],
    width: usize,
    height: usize,
) -> GrowResult<Vec<u32>> {
    let dispersion = grid_view("dispersion", dispersion, width, height)?;

    Ok(seeds_by_dispersion(dispersion)
        .into_iter()
        .flat_map(|(row, col)| [row as u32, col as u32])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_view_row_major() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let view = grid_view("mean", &data, 3, 2).unwrap();
        assert_eq!(view.dim(), (2, 3));
        assert_eq!(view[[1, 0]], 3.0);
    }

    #[test]
    fn test_wrong_length_buffer_rejected() {
        let data = [0.0; 5];
        let err = grid_view("dispersion", &data, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            GrowError::InvalidBuffer {
                name: "dispersion",
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = grid_view("mean", &[], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, GrowError::GridTooLarge { height: 2, .. }));
    }

    #[test]
    fn test_grow_flat() {
        // 2x3 grid, column 1 far from both sides
        let mean = [1.0, 9.0, 1.0, 1.0, 9.0, 1.0];
        let dispersion = [0.0; 6];
        let options = GrowOptions::new(0.5, 1.0);

        let labels =
            grow_regions_flat(&mean, &dispersion, 3, 2, &[0, 0, 1, 2], &options).unwrap();

        assert_eq!(labels, vec![1, 0, 2, 1, 0, 2]);
    }

    #[test]
    fn test_grow_flat_rejects_bad_input() {
        let grid = [1.0; 4];
        let options = GrowOptions::new(0.5, 1.0);

        let err = grow_regions_flat(&grid, &grid, 2, 2, &[0, 0, 1], &options).unwrap_err();
        assert!(matches!(err, GrowError::InvalidSeedArray(_)));

        let err = grow_regions_flat(&grid, &grid[..3], 2, 2, &[0, 0], &options).unwrap_err();
        assert!(matches!(err, GrowError::InvalidBuffer { name: "dispersion", .. }));

        let err = grow_regions_flat(&grid, &grid, 2, 2, &[2, 0], &options).unwrap_err();
        assert!(matches!(err, GrowError::SeedOutOfBounds { row: 2, .. }));
    }

    #[test]
    fn test_flat_seed_order_round_trip() {
        let dispersion = [0.4, f64::NAN, 0.1, 0.3, 0.2, 0.0];

        let flat = seeds_by_dispersion_flat(&dispersion, 3, 2).unwrap();
        assert_eq!(flat, vec![1, 2, 0, 2, 1, 1, 1, 0, 0, 0]);

        let decoded = seeds_from_flat(&flat).unwrap();
        assert_eq!(decoded, vec![(1, 2), (0, 2), (1, 1), (1, 0), (0, 0)]);
    }
}
