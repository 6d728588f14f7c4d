use std::collections::BTreeMap;

use serde_json::Value;

use super::decode::decode_list;
use super::ValidationReport;
use crate::grid::{is_valid_position, GridPosition};
use crate::map::{FeatureType, MapFeature};

pub const DOCKING_SLOTS_KEY: &str = "dockingSlots";
pub const DANGER_KEY: &str = "danger";

/// Per-feature checks: non-empty name and an in-bounds position. Ports
/// without docking slots and reefs/hazards without a danger rating are
/// warnings.
pub fn validate_features(features: &[MapFeature]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for (i, feature) in features.iter().enumerate() {
        check_feature(i, feature, &mut report);
    }
    report
}

/// Per-feature checks over raw JSON. Unknown types and missing fields are
/// reported per entry; entries that decode go through [`validate_features`]
/// rules and are returned.
pub fn validate_feature_values(value: &Value) -> (ValidationReport, Vec<MapFeature>) {
    let mut report = ValidationReport::new();
    let (decoded, errors) = decode_list::<MapFeature>(value, "Feature", "Features");
    for e in errors {
        report.error(e);
    }
    for (i, feature) in &decoded {
        check_feature(*i, feature, &mut report);
    }
    let features = decoded.into_iter().map(|(_, f)| f).collect();
    (report, features)
}

fn check_feature(index: usize, feature: &MapFeature, report: &mut ValidationReport) {
    let slot = index + 1;

    if feature.name.trim().is_empty() {
        report.error(format!("Feature {}: name is missing", slot));
    }

    if !is_valid_position(feature.position) {
        report.error(format!(
            "Feature {}: position {} is outside the grid",
            slot, feature.position
        ));
    }

    match feature.feature_type {
        FeatureType::Port if !feature.has_property(DOCKING_SLOTS_KEY) => {
            report.warning(format!("Feature {}: Port missing docking slots", slot));
        }
        FeatureType::Reef | FeatureType::Hazard if !feature.has_property(DANGER_KEY) => {
            report.warning(format!(
                "Feature {}: {} missing danger level",
                slot, feature.feature_type
            ));
        }
        _ => {}
    }
}

fn label(feature: &MapFeature) -> String {
    if feature.name.trim().is_empty() {
        feature.feature_type.to_string()
    } else {
        format!("{} ({})", feature.name, feature.feature_type)
    }
}

/// Group features by exact cell. A port sharing its cell with a single
/// island is a port built on land and only warns; any other shared cell,
/// including every collision of three or more features, is an error.
pub fn validate_feature_overlaps(features: &[MapFeature]) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut by_position: BTreeMap<GridPosition, Vec<&MapFeature>> = BTreeMap::new();
    for feature in features {
        by_position.entry(feature.position).or_default().push(feature);
    }

    for (position, group) in &by_position {
        if group.len() < 2 {
            continue;
        }
        let names = group.iter().map(|f| label(f)).collect::<Vec<_>>().join(", ");

        let port_on_island = group.len() == 2
            && group.iter().any(|f| f.feature_type == FeatureType::Port)
            && group.iter().any(|f| f.feature_type == FeatureType::Island);

        if port_on_island {
            report.warning(format!(
                "Position {}: Port and island overlap - {}",
                position, names
            ));
        } else {
            report.error(format!(
                "Position {}: Multiple features overlap - {}",
                position, names
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn port(name: &str, x: i32, y: i32) -> MapFeature {
        MapFeature::new(FeatureType::Port, name, x, y).with_property(DOCKING_SLOTS_KEY, 6)
    }

    fn island(name: &str, x: i32, y: i32) -> MapFeature {
        MapFeature::new(FeatureType::Island, name, x, y)
    }

    #[test]
    fn well_formed_features_pass_cleanly() {
        let features = vec![
            port("Port Royal", 5, 5),
            island("Monkey Island", 8, 8),
            MapFeature::new(FeatureType::Reef, "Coral Reef", 7, 12).with_property(DANGER_KEY, "medium"),
        ];
        let report = validate_features(&features);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn out_of_bounds_and_unnamed_are_errors() {
        let features = vec![island("", 3, 3), island("Far Away", 20, 4)];
        let report = validate_features(&features);
        assert_eq!(
            report.errors,
            vec![
                "Feature 1: name is missing".to_string(),
                "Feature 2: position (20, 4) is outside the grid".to_string(),
            ]
        );
    }

    #[test]
    fn missing_metadata_only_warns() {
        let features = vec![
            MapFeature::new(FeatureType::Port, "Bare Dock", 1, 1),
            MapFeature::new(FeatureType::Reef, "Unrated Reef", 2, 2),
            MapFeature::new(FeatureType::Hazard, "Unrated Hazard", 3, 3),
            MapFeature::new(FeatureType::TreasureSite, "Buried Gold", 4, 4),
        ];
        let report = validate_features(&features);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec![
                "Feature 1: Port missing docking slots".to_string(),
                "Feature 2: REEF missing danger level".to_string(),
                "Feature 3: HAZARD missing danger level".to_string(),
            ]
        );
    }

    #[test]
    fn raw_values_report_unknown_type() {
        let value = json!([
            {"type": "PORT", "name": "Nassau", "position": {"x": 15, "y": 3},
             "properties": {"dockingSlots": 6}, "isVisible": true},
            {"type": "VOLCANO", "name": "Smoking Peak", "position": {"x": 1, "y": 1}},
            {"type": "ISLAND", "position": {"x": 2, "y": 2}}
        ]);
        let (report, features) = validate_feature_values(&value);
        assert_eq!(features.len(), 1);
        assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
        assert!(report.errors[0].starts_with("Feature 2:") && report.errors[0].contains("VOLCANO"));
        assert!(report.errors[1].starts_with("Feature 3:") && report.errors[1].contains("name"));
    }

    #[test]
    fn port_on_island_is_a_warning() {
        let features = vec![port("Harbour Town", 4, 4), island("Green Isle", 4, 4)];
        let report = validate_feature_overlaps(&features);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Position (4, 4): Port and island overlap"));
    }

    #[test]
    fn other_collisions_are_errors() {
        let features = vec![
            port("A", 1, 1),
            port("B", 1, 1),
            island("C", 9, 9),
            MapFeature::new(FeatureType::Reef, "D", 9, 9),
        ];
        let report = validate_feature_overlaps(&features);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("A (PORT), B (PORT)"));
    }

    #[test]
    fn three_way_collision_with_port_and_island_is_an_error() {
        let features = vec![port("P", 6, 6), island("I", 6, 6), island("J", 6, 6)];
        let report = validate_feature_overlaps(&features);
        assert!(!report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn distinct_positions_do_not_overlap() {
        let features = vec![port("A", 1, 1), island("B", 1, 2)];
        let report = validate_feature_overlaps(&features);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }
}
