use serde::Serialize;

use super::types::*;
use super::{GridError, GRID_SIZE, REGION_COUNT, REGION_SIZE};

/// Neighbor offsets in row-major scan order: the row above, the two sides,
/// then the row below.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), // Northwest
    (0, -1),  // North
    (1, -1),  // Northeast
    (-1, 0),  // West
    (1, 0),   // East
    (-1, 1),  // Southwest
    (0, 1),   // South
    (1, 1),   // Southeast
];

/// Result of a structural grid check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Build the full GRID_SIZE x GRID_SIZE matrix, indexed `[y][x]`.
///
/// Every cell starts as visible open water with its region derived from its
/// coordinates.
pub fn create_grid() -> Vec<Vec<GridCell>> {
    (0..GRID_SIZE)
        .map(|y| {
            (0..GRID_SIZE)
                .map(|x| GridCell {
                    x,
                    y,
                    region: quadrant_of(x, y),
                    terrain: TerrainType::Water,
                    visibility: Some(true),
                })
                .collect()
        })
        .collect()
}

/// Quadrant id for an in-bounds coordinate. Callers check bounds first.
fn quadrant_of(x: i32, y: i32) -> u32 {
    match (x < REGION_SIZE, y < REGION_SIZE) {
        (true, true) => 1,
        (false, true) => 2,
        (true, false) => 3,
        (false, false) => 4,
    }
}

/// Region id (1-4) of the quadrant containing `pos`.
pub fn get_region_from_position(pos: GridPosition) -> Result<u32, GridError> {
    if !is_valid_position(pos) {
        return Err(GridError::InvalidPosition { x: pos.x, y: pos.y });
    }
    Ok(quadrant_of(pos.x, pos.y))
}

/// Canonical bounds of region `id`.
pub fn get_region_bounds(id: u32) -> Result<RegionBounds, GridError> {
    if !(1..=REGION_COUNT).contains(&id) {
        return Err(GridError::InvalidRegionId(id));
    }
    Ok(canonical_bounds(id))
}

pub fn is_valid_position(pos: GridPosition) -> bool {
    (0..GRID_SIZE).contains(&pos.x) && (0..GRID_SIZE).contains(&pos.y)
}

/// Euclidean distance between two cells.
pub fn calculate_distance(a: GridPosition, b: GridPosition) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    (dx * dx + dy * dy).sqrt()
}

/// The up-to-8 in-bounds neighbors of `pos`.
pub fn get_adjacent_cells(pos: GridPosition) -> Vec<GridPosition> {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| {
            Some(GridPosition::new(pos.x.checked_add(dx)?, pos.y.checked_add(dy)?))
        })
        .filter(|&p| is_valid_position(p))
        .collect()
}

/// All in-bounds cells within Euclidean distance `radius` of `center`,
/// in row-major order. A negative or non-finite radius selects nothing.
pub fn get_cells_in_radius(center: GridPosition, radius: f64) -> Vec<GridPosition> {
    if !radius.is_finite() || radius < 0.0 {
        return Vec::new();
    }
    let reach = radius.floor().min(GRID_SIZE as f64) as i32;
    let min_y = center.y.saturating_sub(reach).max(0);
    let max_y = center.y.saturating_add(reach).min(GRID_SIZE - 1);
    let min_x = center.x.saturating_sub(reach).max(0);
    let max_x = center.x.saturating_add(reach).min(GRID_SIZE - 1);

    let mut cells = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let cell = GridPosition::new(x, y);
            if calculate_distance(center, cell) <= radius {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Compass bucket of the bearing from `from` to `to`.
///
/// Uses screen orientation: positive y points south. Identical positions
/// have no bearing and yield `Calm`.
pub fn get_compass_direction(from: GridPosition, to: GridPosition) -> WindDirection {
    if from == to {
        return WindDirection::Calm;
    }
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    WindDirection::from_bearing(dy.atan2(dx).to_degrees())
}

/// Canonical four-region seed used when a map carries no authored regions.
pub fn create_default_regions() -> Vec<GridRegion> {
    let presets = [
        ("Caribbean East", WindDirection::E, 2, 80, WeatherCondition::Clear),
        ("Bahamas", WindDirection::NE, 1, 90, WeatherCondition::Clear),
        ("Spanish Main", WindDirection::W, 3, 70, WeatherCondition::Storm),
        ("Caribbean West", WindDirection::S, 0, 100, WeatherCondition::Clear),
    ];

    presets
        .into_iter()
        .zip(1..=REGION_COUNT)
        .map(|((name, wind_direction, wind_strength, visibility, condition), id)| GridRegion {
            id,
            name: name.to_string(),
            bounds: canonical_bounds(id),
            weather: RegionWeather {
                wind_direction,
                wind_strength,
                visibility,
                conditions: vec![condition],
            },
        })
        .collect()
}

/// Quadrant layout for an id already known to be in 1..=4; ids are 1-based,
/// numbered left-to-right then top-to-bottom.
pub(crate) fn canonical_bounds(id: u32) -> RegionBounds {
    let index = (id.clamp(1, REGION_COUNT) - 1) as i32;
    RegionBounds {
        x: (index % 2) * REGION_SIZE,
        y: (index / 2) * REGION_SIZE,
        width: REGION_SIZE,
        height: REGION_SIZE,
    }
}

/// Structural check of a grid matrix: dimensions, stored coordinates and
/// derived regions. Never panics; every problem becomes an error line.
pub fn validate_grid(grid: &[Vec<GridCell>]) -> GridValidation {
    let mut errors = Vec::new();

    if grid.len() != GRID_SIZE as usize {
        errors.push(format!(
            "Invalid grid height: expected {}, got {}",
            GRID_SIZE,
            grid.len()
        ));
    }

    for (y, row) in grid.iter().enumerate() {
        if row.len() != GRID_SIZE as usize {
            errors.push(format!(
                "Invalid grid width at row {}: expected {}, got {}",
                y,
                GRID_SIZE,
                row.len()
            ));
        }

        for (x, cell) in row.iter().enumerate() {
            let (x, y) = (x as i32, y as i32);

            if cell.x != x || cell.y != y {
                errors.push(format!(
                    "Position mismatch at ({}, {}): cell reports ({}, {})",
                    x, y, cell.x, cell.y
                ));
            }

            if !(1..=REGION_COUNT).contains(&cell.region) {
                errors.push(format!("Invalid region at ({}, {}): {}", x, y, cell.region));
            }

            match get_region_from_position(GridPosition::new(x, y)) {
                Ok(expected) if expected != cell.region => {
                    errors.push(format!(
                        "Incorrect region at ({}, {}): expected {}, got {}",
                        x, y, expected, cell.region
                    ));
                }
                Ok(_) => {}
                Err(_) => {
                    errors.push(format!("Cell ({}, {}) lies outside the grid", x, y));
                }
            }
        }
    }

    GridValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
