//! Acceptance checks for regions, features, movement paths and templates.
//!
//! Every check returns a [`ValidationReport`]; bad input never panics and
//! never aborts a check early except where noted.

pub mod decode;
pub mod features;
pub mod movement;
pub mod regions;
pub mod report;

pub use features::{validate_feature_overlaps, validate_feature_values, validate_features};
pub use movement::validate_movement_path;
pub use regions::{validate_region_values, validate_regions};
pub use report::ValidationReport;

use crate::grid::{GridRegion, GRID_SIZE};
use crate::map::{MapFeature, MapTemplate};

/// Region, feature and overlap checks combined.
pub fn validate_map(regions: &[GridRegion], features: &[MapFeature]) -> ValidationReport {
    let mut report = validate_regions(regions);
    report.merge(validate_features(features));
    report.merge(validate_feature_overlaps(features));
    report
}

/// Check a template. A wrong grid size is an error; an empty region list
/// or feature list means the template defers to defaults and only warns.
pub fn validate_template(template: &MapTemplate) -> ValidationReport {
    let mut report = ValidationReport::new();

    if template.grid_size != GRID_SIZE {
        report.error(format!(
            "Invalid grid size: expected {}, got {}",
            GRID_SIZE, template.grid_size
        ));
    }

    if template.regions.is_empty() {
        report.warning("Template has no region data");
    } else {
        report.merge(validate_regions(&template.regions));
    }

    if template.default_features.is_empty() {
        report.warning("Template has no default features");
    } else {
        report.merge(validate_features(&template.default_features));
        report.merge(validate_feature_overlaps(&template.default_features));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::create_default_regions;
    use crate::map::{Difficulty, FeatureType};

    fn template() -> MapTemplate {
        MapTemplate {
            id: "test".to_string(),
            name: "Test Waters".to_string(),
            description: "fixture".to_string(),
            grid_size: GRID_SIZE,
            regions: create_default_regions(),
            default_features: vec![
                MapFeature::new(FeatureType::Island, "Isle", 3, 3),
            ],
            difficulty: Difficulty::Beginner,
        }
    }

    #[test]
    fn validate_map_aggregates_all_checks() {
        let mut regions = create_default_regions();
        regions[0].weather.wind_strength = 9;
        let features = vec![
            MapFeature::new(FeatureType::Port, "Dock", 2, 2),
            MapFeature::new(FeatureType::Reef, "Reef", 2, 2),
        ];
        let report = validate_map(&regions, &features);
        assert!(!report.is_valid);
        // wind strength + overlap
        assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
        // port slots + reef danger
        assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
    }

    #[test]
    fn warnings_never_block_a_map() {
        let features = vec![MapFeature::new(FeatureType::Port, "Dock", 2, 2)];
        let report = validate_map(&create_default_regions(), &features);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn revalidating_is_stable() {
        let regions = create_default_regions();
        let features = vec![MapFeature::new(FeatureType::Island, "Isle", 3, 3)];
        let first = validate_map(&regions, &features);
        let second = validate_map(&regions, &features);
        assert_eq!(first, second);
        assert!(second.errors.is_empty());
    }

    #[test]
    fn valid_template_passes() {
        let report = validate_template(&template());
        assert!(report.is_valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn wrong_grid_size_is_an_error() {
        let mut t = template();
        t.grid_size = 32;
        let report = validate_template(&t);
        assert_eq!(report.errors, vec!["Invalid grid size: expected 20, got 32"]);
    }

    #[test]
    fn missing_sections_only_warn() {
        let mut t = template();
        t.regions.clear();
        t.default_features.clear();
        let report = validate_template(&t);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 2);
    }
}
