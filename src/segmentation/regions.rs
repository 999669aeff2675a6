//! Inspection of a finished label grid.
//!
//! Label values are only used as keys, so grids carrying arbitrary `u32`
//! labels cost memory proportional to the number of distinct labels.

use std::collections::BTreeMap;

use ndarray::ArrayView2;

use crate::error::{GrowError, GrowResult};

/// Summary of one labeled region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    /// Region label (seed ordinal, 1-based)
    pub label: u32,
    /// Number of cells carrying the label
    pub population: usize,
    /// Average of the mean field over the region's cells
    pub mean_value: f64,
    /// Bounding box as (row, col, height, width)
    pub bounds: (usize, usize, usize, usize),
}

/// Running totals for one label while scanning the grid.
struct RegionAccumulator {
    population: usize,
    sum: f64,
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
}

impl RegionAccumulator {
    fn new(row: usize, col: usize) -> Self {
        Self {
            population: 0,
            sum: 0.0,
            min_row: row,
            min_col: col,
            max_row: row,
            max_col: col,
        }
    }

    fn add(&mut self, row: usize, col: usize, value: f64) {
        self.population += 1;
        self.sum += value;
        self.min_row = self.min_row.min(row);
        self.min_col = self.min_col.min(col);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }
}

/// Cell count for every label present in the grid, in ascending label order.
///
/// Label 0 (unlabeled) is included when any cell carries it.
pub fn region_populations(labels: ArrayView2<u32>) -> Vec<(u32, usize)> {
    let mut counts = BTreeMap::new();
    for &label in labels.iter() {
        *counts.entry(label).or_insert(0usize) += 1;
    }
    counts.into_iter().collect()
}

/// Summaries of every non-empty region, sorted by label.
///
/// # Arguments
/// * `labels` - Label grid produced by the grower
/// * `mean` - Mean field the labels were grown on (same shape)
pub fn region_summaries(
    labels: ArrayView2<u32>,
    mean: ArrayView2<f64>,
) -> GrowResult<Vec<RegionSummary>> {
    if labels.dim() != mean.dim() {
        return Err(GrowError::LabelShapeMismatch {
            labels: labels.dim(),
            mean: mean.dim(),
        });
    }

    let mut regions: BTreeMap<u32, RegionAccumulator> = BTreeMap::new();
    for ((row, col), &label) in labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        regions
            .entry(label)
            .or_insert_with(|| RegionAccumulator::new(row, col))
            .add(row, col, mean[[row, col]]);
    }

    Ok(regions
        .into_iter()
        .map(|(label, acc)| RegionSummary {
            label,
            population: acc.population,
            mean_value: acc.sum / acc.population as f64,
            bounds: (
                acc.min_row,
                acc.min_col,
                acc.max_row - acc.min_row + 1,
                acc.max_col - acc.min_col + 1,
            ),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_populations() {
        let labels = array![[0u32, 1, 1], [3, 3, 3]];
        assert_eq!(region_populations(labels.view()), vec![(0, 1), (1, 2), (3, 3)]);
    }

    #[test]
    fn test_populations_unlabeled_grid() {
        let labels = Array2::<u32>::zeros((2, 2));
        assert_eq!(region_populations(labels.view()), vec![(0, 4)]);

        let empty = Array2::<u32>::zeros((0, 3));
        assert!(region_populations(empty.view()).is_empty());
    }

    #[test]
    fn test_summaries() {
        let labels = array![[1u32, 1, 0], [0, 4, 4], [0, 0, 4]];
        let mean = array![[1.0, 3.0, 9.0], [9.0, 2.0, 2.0], [9.0, 9.0, 5.0]];

        let summaries = region_summaries(labels.view(), mean.view()).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(
            summaries[0],
            RegionSummary {
                label: 1,
                population: 2,
                mean_value: 2.0,
                bounds: (0, 0, 1, 2),
            }
        );
        assert_eq!(summaries[1].label, 4);
        assert_eq!(summaries[1].population, 3);
        assert_eq!(summaries[1].mean_value, 3.0);
        assert_eq!(summaries[1].bounds, (1, 1, 2, 2));
    }

    #[test]
    fn test_summaries_shape_mismatch() {
        let labels = Array2::<u32>::zeros((2, 2));
        let mean = Array2::<f64>::zeros((2, 3));
        let err = region_summaries(labels.view(), mean.view()).unwrap_err();
        assert!(matches!(
            err,
            GrowError::LabelShapeMismatch {
                labels: (2, 2),
                mean: (2, 3)
            }
        ));
        assert!(!err.to_string().contains("dispersion"));
    }

    #[test]
    fn test_extreme_labels_stay_sparse() {
        let labels = array![[0u32, u32::MAX], [u32::MAX, 7]];
        let mean = array![[1.0, 2.0], [4.0, 5.0]];

        assert_eq!(
            region_populations(labels.view()),
            vec![(0, 1), (7, 1), (u32::MAX, 2)]
        );

        let summaries = region_summaries(labels.view(), mean.view()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].label, 7);
        assert_eq!(summaries[1].label, u32::MAX);
        assert_eq!(summaries[1].population, 2);
        assert_eq!(summaries[1].mean_value, 3.0);
        assert_eq!(summaries[1].bounds, (0, 0, 2, 2));
    }
}
