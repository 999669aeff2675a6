//! Seeded region growing on mean/dispersion statistics.
//!
//! Regions start at caller-ordered seed cells and grow breadth-first into
//! neighbours whose mean lies inside an acceptance window centred on the
//! region's running average, and whose dispersion is below a stability
//! limit. A later region may take cells away from an earlier one as long as
//! the earlier region is still small (see [`GrowOptions::overwrite_limit`]).

use std::collections::VecDeque;

use log::{debug, trace};
use ndarray::{Array2, ArrayView2};

use crate::error::{GrowError, GrowResult};

/// Default population above which a region can no longer lose cells.
pub const DEFAULT_OVERWRITE_LIMIT: usize = 20;

/// Neighbour offsets as (dy, dx): left, up, right, down, then up-left,
/// up-right, down-left, down-right. The 4-connected prefix is used when
/// diagonals are disabled.
const NEIGHBORS: [(isize, isize); 8] = [
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Parameters controlling region growth.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowOptions {
    /// Half-width of the acceptance window around the running mean.
    pub tolerance: f64,
    /// Cells with dispersion at or above this value never join a region,
    /// and a seed at or above it does not grow.
    pub dispersion_limit: f64,
    /// Include the four diagonal neighbours.
    pub diagonal: bool,
    /// Largest population a region may have and still lose cells to a
    /// later region.
    pub overwrite_limit: usize,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            dispersion_limit: f64::INFINITY,
            diagonal: true,
            overwrite_limit: DEFAULT_OVERWRITE_LIMIT,
        }
    }
}

impl GrowOptions {
    /// Options with the given window tolerance and dispersion limit,
    /// diagonal neighbours enabled and the default overwrite limit.
    pub fn new(tolerance: f64, dispersion_limit: f64) -> Self {
        Self {
            tolerance,
            dispersion_limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    #[must_use]
    pub fn with_overwrite_limit(mut self, overwrite_limit: usize) -> Self {
        self.overwrite_limit = overwrite_limit;
        self
    }

    /// Check option-level preconditions.
    pub fn validate(&self) -> GrowResult<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(GrowError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Convert a signed overwrite limit (as received from bindings) to `usize`.
pub fn checked_overwrite_limit(value: i64) -> GrowResult<usize> {
    usize::try_from(value).map_err(|_| GrowError::NegativeOverwriteLimit(value))
}

/// Region growing result with bookkeeping.
#[derive(Debug, Clone)]
pub struct RegionGrowResult {
    /// Label grid: 0 = unlabeled, `i` = grown from the i-th seed (1-based)
    pub labels: Array2<u32>,
    /// Final cell count per label; index 0 holds the unlabeled count
    pub populations: Vec<usize>,
    /// 0-based indices of seeds skipped because their cell was already labeled
    pub skipped_seeds: Vec<usize>,
    /// Number of admissions that took a cell from an earlier region
    pub overwritten: usize,
}

impl RegionGrowResult {
    /// Number of labels that still own at least one cell.
    pub fn region_count(&self) -> usize {
        self.populations.iter().skip(1).filter(|&&n| n > 0).count()
    }
}

/// Grow labeled regions from `seeds`.
///
/// # Arguments
/// * `mean` - Per-cell mean values (height, width)
/// * `dispersion` - Per-cell dispersion values, same shape; NaN cells never join a region
/// * `seeds` - (row, col) seed coordinates in priority order
/// * `options` - Window tolerance, dispersion limit, connectivity, overwrite limit
///
/// # Returns
/// Label grid of the same shape, 0 meaning unlabeled
pub fn grow_regions(
    mean: ArrayView2<f64>,
    dispersion: ArrayView2<f64>,
    seeds: &[(usize, usize)],
    options: &GrowOptions,
) -> GrowResult<Array2<u32>> {
    grow_regions_detailed(mean, dispersion, seeds, options).map(|result| result.labels)
}

/// Grow labeled regions from `seeds`, returning populations and skip information.
pub fn grow_regions_detailed(
    mean: ArrayView2<f64>,
    dispersion: ArrayView2<f64>,
    seeds: &[(usize, usize)],
    options: &GrowOptions,
) -> GrowResult<RegionGrowResult> {
    validate_inputs(&mean, &dispersion, seeds, options)?;

    let (height, width) = mean.dim();
    debug!(
        "growing {}x{} grid from {} seeds: tolerance {}, limit {}, diagonal {}, overwrite {}",
        height,
        width,
        seeds.len(),
        options.tolerance,
        options.dispersion_limit,
        options.diagonal,
        options.overwrite_limit
    );

    let neighbors: &[(isize, isize)] = if options.diagonal {
        &NEIGHBORS
    } else {
        &NEIGHBORS[..4]
    };

    let mut labels = Array2::<u32>::zeros((height, width));
    let mut population = LabelPopulation::new(height * width, seeds.len());
    let mut skipped_seeds = Vec::new();
    let mut overwritten = 0;
    let mut queue = VecDeque::new();

    for (index, &(row, col)) in seeds.iter().enumerate() {
        // validate_inputs guarantees seeds.len() fits in u32
        let label = (index + 1) as u32;

        if labels[[row, col]] != 0 {
            trace!(
                "seed {} at ({}, {}) already labeled {}",
                label,
                row,
                col,
                labels[[row, col]]
            );
            skipped_seeds.push(index);
            continue;
        }

        labels[[row, col]] = label;
        population.transfer(0, label);

        if dispersion[[row, col]] >= options.dispersion_limit {
            trace!("seed {} at ({}, {}) is unstable, not grown", label, row, col);
            continue;
        }

        let mut sum = mean[[row, col]];
        let mut count = 1usize;
        let mut window = Window::around(sum, count, options.tolerance);
        queue.clear();
        queue.push_back((row, col));

        while let Some((y, x)) = queue.pop_front() {
            for &(dy, dx) in neighbors {
                let Some((ny, nx)) = offset(y, x, dy, dx, height, width) else {
                    continue;
                };

                let current = labels[[ny, nx]];
                if current == label {
                    continue;
                }
                if current != 0 && population.get(current) > options.overwrite_limit {
                    continue;
                }

                let value = mean[[ny, nx]];
                if !window.contains(value)
                    || !is_stable(dispersion[[ny, nx]], options.dispersion_limit)
                {
                    continue;
                }

                labels[[ny, nx]] = label;
                population.transfer(current, label);
                if current != 0 {
                    overwritten += 1;
                }
                queue.push_back((ny, nx));

                sum += value;
                count += 1;
                window = Window::around(sum, count, options.tolerance);
            }
        }

        trace!(
            "seed {} at ({}, {}) grew to {} cells (mean {})",
            label,
            row,
            col,
            count,
            sum / count as f64
        );
    }

    let result = RegionGrowResult {
        labels,
        populations: population.into_counts(),
        skipped_seeds,
        overwritten,
    };
    debug!(
        "grown {} regions: {} seeds skipped, {} cells overwritten, {} unlabeled",
        result.region_count(),
        result.skipped_seeds.len(),
        result.overwritten,
        result.populations[0]
    );

    Ok(result)
}

/// Reject contract violations before any label is written.
fn validate_inputs(
    mean: &ArrayView2<f64>,
    dispersion: &ArrayView2<f64>,
    seeds: &[(usize, usize)],
    options: &GrowOptions,
) -> GrowResult<()> {
    if mean.dim() != dispersion.dim() {
        return Err(GrowError::ShapeMismatch {
            mean: mean.dim(),
            dispersion: dispersion.dim(),
        });
    }

    options.validate()?;

    if u32::try_from(seeds.len()).is_err() {
        return Err(GrowError::TooManySeeds { count: seeds.len() });
    }

    let (height, width) = mean.dim();
    for (index, &(row, col)) in seeds.iter().enumerate() {
        if row >= height || col >= width {
            return Err(GrowError::SeedOutOfBounds {
                index,
                row,
                col,
                height,
                width,
            });
        }
    }

    Ok(())
}

/// Inclusive range of mean values accepted into the growing region.
#[derive(Debug, Clone, Copy)]
struct Window {
    low: f64,
    high: f64,
}

impl Window {
    /// Recompute from the running statistics, never by adjusting old bounds.
    #[inline]
    fn around(sum: f64, count: usize, tolerance: f64) -> Self {
        let average = sum / count as f64;
        Self {
            low: average - tolerance,
            high: average + tolerance,
        }
    }

    #[inline]
    fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Cell count per label, kept in step with the label grid.
struct LabelPopulation {
    counts: Vec<usize>,
}

impl LabelPopulation {
    fn new(cells: usize, seeds: usize) -> Self {
        let mut counts = vec![0; seeds + 1];
        counts[0] = cells;
        Self { counts }
    }

    #[inline]
    fn get(&self, label: u32) -> usize {
        self.counts[label as usize]
    }

    /// Move one cell from label `from` to label `to`.
    #[inline]
    fn transfer(&mut self, from: u32, to: u32) {
        self.counts[from as usize] -= 1;
        self.counts[to as usize] += 1;
    }

    fn into_counts(self) -> Vec<usize> {
        self.counts
    }
}

/// NaN dispersion is never stable.
#[inline]
fn is_stable(dispersion: f64, limit: f64) -> bool {
    dispersion < limit
}

#[inline]
fn offset(
    y: usize,
    x: usize,
    dy: isize,
    dx: isize,
    height: usize,
    width: usize,
) -> Option<(usize, usize)> {
    let ny = y.checked_add_signed(dy)?;
    let nx = x.checked_add_signed(dx)?;
    (ny < height && nx < width).then_some((ny, nx))
}
