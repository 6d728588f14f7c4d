use super::ValidationReport;
use crate::grid::{calculate_distance, is_valid_position, GridPosition, GridRegion};
use crate::map::{FeatureType, MapFeature};

/// Longest legal single step: one diagonal cell, with slack for rounding.
pub const MAX_STEP_DISTANCE: f64 = std::f64::consts::SQRT_2 + 0.01;

/// Check a ship's movement path.
///
/// Every step must lie on the grid, must not land on an island and must be
/// at most one orthogonal or diagonal cell away from the previous step.
/// Crossing a reef, hazard or cursed water is allowed with a warning.
/// Region weather does not affect legality.
pub fn validate_movement_path(
    path: &[GridPosition],
    _regions: &[GridRegion],
    features: &[MapFeature],
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if path.is_empty() {
        report.error("Movement path cannot be empty");
        return report;
    }

    for (i, &position) in path.iter().enumerate() {
        let step = i + 1;

        if !is_valid_position(position) {
            report.error(format!(
                "Path step {}: position {} is outside the grid",
                step, position
            ));
            continue;
        }

        for feature in features.iter().filter(|f| f.position == position) {
            match feature.feature_type {
                FeatureType::Island => report.error(format!(
                    "Path step {}: Cannot move through island '{}' at {}",
                    step, feature.name, position
                )),
                FeatureType::Reef => report.warning(format!(
                    "Path step {}: Crossing reef '{}' at {}",
                    step, feature.name, position
                )),
                FeatureType::Hazard | FeatureType::CursedWater => report.warning(format!(
                    "Path step {}: Entering dangerous area '{}' at {}",
                    step, feature.name, position
                )),
                _ => {}
            }
        }

        if i > 0 {
            let distance = calculate_distance(path[i - 1], position);
            if distance > MAX_STEP_DISTANCE {
                report.error(format!(
                    "Path step {}: distance {:.2} from the previous step exceeds one cell",
                    step, distance
                ));
            }
        }
    }

    report
}
