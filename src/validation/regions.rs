use serde_json::Value;

use super::decode::decode_list;
use super::ValidationReport;
use crate::grid::geometry::canonical_bounds;
use crate::grid::{GridRegion, RegionBounds, GRID_SIZE, REGION_COUNT};

pub const MAX_WIND_STRENGTH: i32 = 3;
pub const MAX_VISIBILITY: i32 = 100;

/// Check a typed region list: four regions with ids 1..4 in order, bounds
/// inside the grid and pairwise disjoint, weather values in range.
///
/// Bounds that are valid but differ from the canonical quadrant layout are
/// only a warning.
pub fn validate_regions(regions: &[GridRegion]) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_count(regions.len(), &mut report);
    for (i, region) in regions.iter().enumerate() {
        check_region(i, region, &mut report);
    }
    check_disjoint(regions.iter().enumerate(), &mut report);
    report
}

/// Same checks as [`validate_regions`] over raw JSON, so unknown weather
/// tags and missing fields are reported instead of failing the whole
/// decode. Returns the regions that decoded alongside the report.
pub fn validate_region_values(value: &Value) -> (ValidationReport, Vec<GridRegion>) {
    let mut report = ValidationReport::new();
    let (decoded, errors) = decode_list::<GridRegion>(value, "Region", "Regions");
    for e in errors {
        report.error(e);
    }
    if let Some(raw) = value.as_array() {
        check_count(raw.len(), &mut report);
    }
    for (i, region) in &decoded {
        check_region(*i, region, &mut report);
    }
    check_disjoint(decoded.iter().map(|(i, r)| (*i, r)), &mut report);

    let regions = decoded.into_iter().map(|(_, r)| r).collect();
    (report, regions)
}

fn check_count(count: usize, report: &mut ValidationReport) {
    if count != REGION_COUNT as usize {
        report.error(format!("Expected {} regions, got {}", REGION_COUNT, count));
    }
}

fn check_region(index: usize, region: &GridRegion, report: &mut ValidationReport) {
    let slot = index as u32 + 1;

    if region.id != slot {
        report.error(format!(
            "Region {}: id mismatch (expected {}, got {})",
            slot, slot, region.id
        ));
    }

    if region.name.trim().is_empty() {
        report.error(format!("Region {}: name is missing", slot));
    }

    check_bounds(slot, &region.bounds, report);

    let weather = &region.weather;
    if !(0..=MAX_WIND_STRENGTH).contains(&weather.wind_strength) {
        report.error(format!(
            "Region {}: wind strength must be between 0 and {}, got {}",
            slot, MAX_WIND_STRENGTH, weather.wind_strength
        ));
    }
    if !(0..=MAX_VISIBILITY).contains(&weather.visibility) {
        report.error(format!(
            "Region {}: visibility must be between 0 and {}, got {}",
            slot, MAX_VISIBILITY, weather.visibility
        ));
    }
}

fn check_bounds(slot: u32, bounds: &RegionBounds, report: &mut ValidationReport) {
    if bounds.width <= 0 || bounds.height <= 0 {
        report.error(format!(
            "Region {}: bounds must have positive size, got {}x{}",
            slot, bounds.width, bounds.height
        ));
        return;
    }

    if bounds.x < 0 || bounds.y < 0 || bounds.right() > GRID_SIZE || bounds.bottom() > GRID_SIZE {
        report.error(format!("Region {}: bounds exceed the grid", slot));
        return;
    }

    if slot <= REGION_COUNT && *bounds != canonical_bounds(slot) {
        report.warning(format!(
            "Region {}: bounds differ from the standard quadrant layout",
            slot
        ));
    }
}

fn overlaps(a: &RegionBounds, b: &RegionBounds) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

fn check_disjoint<'a>(
    regions: impl Iterator<Item = (usize, &'a GridRegion)>,
    report: &mut ValidationReport,
) {
    let sized: Vec<(usize, &RegionBounds)> = regions
        .filter(|(_, r)| r.bounds.width > 0 && r.bounds.height > 0)
        .map(|(i, r)| (i, &r.bounds))
        .collect();

    for (n, (i, a)) in sized.iter().enumerate() {
        for (j, b) in &sized[n + 1..] {
            if overlaps(a, b) {
                report.error(format!("Regions {} and {} overlap", i + 1, j + 1));
            }
        }
    }
}
