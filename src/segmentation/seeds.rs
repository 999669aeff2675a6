//! Seed ordering and seed array conversion.
//!
//! Region growing treats seed order as priority. The usual ordering is
//! "most stable first": every cell with a defined dispersion, sorted by
//! ascending dispersion.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView2};

use crate::error::{GrowError, GrowResult};

/// Every non-NaN dispersion cell as (row, col), ordered by ascending dispersion.
///
/// The sort is stable, so equal dispersions keep row-major order.
pub fn seeds_by_dispersion(dispersion: ArrayView2<f64>) -> Vec<(usize, usize)> {
    let mut cells: Vec<((usize, usize), f64)> = dispersion
        .indexed_iter()
        .filter(|(_, value)| !value.is_nan())
        .map(|(pos, &value)| (pos, value))
        .collect();

    cells.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    cells.into_iter().map(|(pos, _)| pos).collect()
}

/// Decode an (N, 2) array of integer (row, col) pairs.
///
/// Accepts any integer element type that widens to `i64` (`np.argwhere`
/// yields int64, pipelines often narrow to int32). An empty array of any
/// width is accepted as "no seeds". Bounds against a particular grid are
/// checked later by the grower.
pub fn seeds_from_array<T>(rows: ArrayView2<T>) -> GrowResult<Vec<(usize, usize)>>
where
    T: Copy + Into<i64>,
{
    let (count, columns) = rows.dim();
    if count == 0 {
        return Ok(Vec::new());
    }
    if columns != 2 {
        return Err(GrowError::InvalidSeedArray(format!(
            "expected shape (N, 2), got ({count}, {columns})"
        )));
    }

    rows.outer_iter()
        .enumerate()
        .map(|(index, pair)| {
            let (row, col): (i64, i64) = (pair[0].into(), pair[1].into());
            match (usize::try_from(row), usize::try_from(col)) {
                (Ok(row), Ok(col)) => Ok((row, col)),
                _ => Err(GrowError::InvalidSeedArray(format!(
                    "seed {index} has negative coordinate ({row}, {col})"
                ))),
            }
        })
        .collect()
}

/// Decode a flat `[row, col, row, col, ...]` buffer.
pub fn seeds_from_flat(flat: &[u32]) -> GrowResult<Vec<(usize, usize)>> {
    if flat.len() % 2 != 0 {
        return Err(GrowError::InvalidSeedArray(format!(
            "flat seed buffer needs an even length, got {}",
            flat.len()
        )));
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| (pair[0] as usize, pair[1] as usize))
        .collect())
}

/// Encode seeds as an (N, 2) array of (row, col).
pub fn seeds_to_array(seeds: &[(usize, usize)]) -> Array2<i64> {
    let mut out = Array2::<i64>::zeros((seeds.len(), 2));
    for (i, &(row, col)) in seeds.iter().enumerate() {
        out[[i, 0]] = row as i64;
        out[[i, 1]] = col as i64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ascending_dispersion_order() {
        let dispersion = array![[0.3, 0.1], [0.2, 0.0]];

        let seeds = seeds_by_dispersion(dispersion.view());

        assert_eq!(seeds, vec![(1, 1), (0, 1), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_nan_cells_dropped() {
        let dispersion = array![[f64::NAN, 0.5], [0.5, f64::NAN]];

        let seeds = seeds_by_dispersion(dispersion.view());

        assert_eq!(seeds, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_ties_keep_row_major_order() {
        let dispersion = array![[0.2, 0.1, 0.2], [0.1, 0.2, 0.1]];

        let seeds = seeds_by_dispersion(dispersion.view());

        assert_eq!(
            seeds,
            vec![(0, 1), (1, 0), (1, 2), (0, 0), (0, 2), (1, 1)]
        );
    }

    #[test]
    fn test_all_nan_gives_no_seeds() {
        let dispersion = Array2::from_elem((3, 3), f64::NAN);
        assert!(seeds_by_dispersion(dispersion.view()).is_empty());
    }

    #[test]
    fn test_seeds_from_array() {
        let rows = array![[0i64, 1], [4, 2]];
        assert_eq!(seeds_from_array(rows.view()).unwrap(), vec![(0, 1), (4, 2)]);

        let empty = Array2::<i64>::zeros((0, 0));
        assert!(seeds_from_array(empty.view()).unwrap().is_empty());
    }

    #[test]
    fn test_seeds_from_int32_array() {
        let rows = array![[2i32, 0], [1, 3]];
        assert_eq!(seeds_from_array(rows.view()).unwrap(), vec![(2, 0), (1, 3)]);

        let negative = array![[0i32, -4]];
        assert!(matches!(
            seeds_from_array(negative.view()),
            Err(GrowError::InvalidSeedArray(_))
        ));

        let unsigned = array![[7u32, 8]];
        assert_eq!(seeds_from_array(unsigned.view()).unwrap(), vec![(7, 8)]);
    }

    #[test]
    fn test_seeds_from_array_rejects_bad_input() {
        let wide = array![[0i64, 1, 2]];
        assert!(matches!(
            seeds_from_array(wide.view()),
            Err(GrowError::InvalidSeedArray(_))
        ));

        let negative = array![[0i64, 1], [-1, 2]];
        let err = seeds_from_array(negative.view()).unwrap_err();
        assert!(err.to_string().contains("seed 1"));
    }

    #[test]
    fn test_flat_seeds() {
        assert_eq!(seeds_from_flat(&[1, 2, 3, 0]).unwrap(), vec![(1, 2), (3, 0)]);
        assert!(seeds_from_flat(&[]).unwrap().is_empty());
        assert!(matches!(
            seeds_from_flat(&[1, 2, 3]),
            Err(GrowError::InvalidSeedArray(_))
        ));
    }

    #[test]
    fn test_seeds_to_array() {
        let out = seeds_to_array(&[(2, 0), (1, 5)]);
        assert_eq!(out, array![[2i64, 0], [1, 5]]);
        assert_eq!(seeds_to_array(&[]).dim(), (0, 2));
    }
}
