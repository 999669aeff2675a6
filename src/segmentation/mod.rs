//! Statistical segmentation.
//!
//! - **Region growing**: seeded flood fill with an adaptive mean window,
//!   a dispersion gate and an overwrite rule for small earlier regions
//! - **Seeds**: ordering seeds by stability and converting seed arrays
//! - **Regions**: populations and summaries of a finished label grid
//! - **Flat**: the same operations over flat row-major buffers

pub mod flat;
pub mod region_grow;
pub mod regions;
pub mod seeds;

pub use flat::{grid_view, grow_regions_flat, seeds_by_dispersion_flat};
pub use region_grow::{
    checked_overwrite_limit, grow_regions, grow_regions_detailed, GrowOptions, RegionGrowResult,
    DEFAULT_OVERWRITE_LIMIT,
};
pub use regions::{region_populations, region_summaries, RegionSummary};
pub use seeds::{seeds_by_dispersion, seeds_from_array, seeds_from_flat, seeds_to_array};
