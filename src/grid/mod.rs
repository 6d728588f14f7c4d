pub mod error;
pub mod geometry;
pub mod types;

pub use error::GridError;
pub use geometry::{
    calculate_distance, create_default_regions, create_grid, get_adjacent_cells,
    get_cells_in_radius, get_compass_direction, get_region_bounds, get_region_from_position,
    is_valid_position, validate_grid, GridValidation,
};
pub use types::{
    GridCell, GridPosition, GridRegion, RegionBounds, RegionWeather, TerrainType,
    WeatherCondition, WindDirection,
};

/// Cells per side of the square tactical grid.
pub const GRID_SIZE: i32 = 20;

/// Number of quadrant regions partitioning the grid.
pub const REGION_COUNT: u32 = 4;

/// Side length of one quadrant.
pub const REGION_SIZE: i32 = GRID_SIZE / 2;
