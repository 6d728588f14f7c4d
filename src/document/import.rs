use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::envelope::{
    timestamp_now, MapContent, MapExportData, MapMetadata, MapSettings, CURRENT_VERSION,
    SUPPORTED_VERSIONS,
};
use crate::grid::GRID_SIZE;
use crate::validation::{
    validate_feature_overlaps, validate_feature_values, validate_region_values, ValidationReport,
};

/// Outcome of an import: the accepted document (on success) plus every
/// error and warning collected along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MapExportData>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ImportResult {
    fn rejected(report: ValidationReport) -> Self {
        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Map import rejected"
        );
        ImportResult {
            success: false,
            data: None,
            errors: report.errors,
            warnings: report.warnings,
        }
    }

    /// Rejection for input that never got as far as structural checks.
    pub(crate) fn failed(error: String) -> Self {
        let mut report = ValidationReport::new();
        report.error(error);
        Self::rejected(report)
    }
}

/// Import a map document from text. Unparseable JSON is reported as an
/// import error.
pub fn import_map_str(text: &str) -> ImportResult {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => import_map(&value),
        Err(e) => ImportResult::failed(format!("Invalid JSON: {}", e)),
    }
}

/// Structural and semantic acceptance of a map document.
///
/// Stops at the first structural problem (not an object, unsupported
/// version, missing metadata, map or regions). Past that point all region
/// and feature findings are collected. A missing version or features list
/// and a grid size mismatch are warnings. An accepted document gets a fresh
/// `modified` stamp.
pub fn import_map(doc: &Value) -> ImportResult {
    let mut report = ValidationReport::new();

    let Some(root) = doc.as_object() else {
        return ImportResult::failed("Invalid map document: expected a JSON object".to_string());
    };

    // An empty string counts as no version at all.
    let declared = root
        .get("version")
        .filter(|v| !v.is_null() && v.as_str().is_none_or(|s| !s.trim().is_empty()));

    let version = match declared {
        None => {
            report.warning(format!(
                "No version specified, assuming {}",
                CURRENT_VERSION
            ));
            CURRENT_VERSION.to_string()
        }
        Some(Value::String(v)) if SUPPORTED_VERSIONS.contains(&v.as_str()) => v.clone(),
        Some(other) => {
            let shown = other.as_str().map(str::to_string).unwrap_or_else(|| other.to_string());
            report.error(format!(
                "Unsupported version: {}. Supported versions: {}",
                shown,
                SUPPORTED_VERSIONS.join(", ")
            ));
            return ImportResult::rejected(report);
        }
    };

    let metadata_value = match root.get("metadata") {
        Some(m) if has_name(m) => m,
        _ => {
            report.error("Map metadata is missing or invalid");
            return ImportResult::rejected(report);
        }
    };

    let Some(map) = root.get("map").and_then(Value::as_object) else {
        report.error("Map data is missing");
        return ImportResult::rejected(report);
    };

    let grid_size = match map.get("gridSize") {
        None | Some(Value::Null) => {
            report.warning(format!(
                "Grid size missing, assuming {}",
                GRID_SIZE
            ));
            GRID_SIZE
        }
        Some(value) => match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(size) => {
                if size != GRID_SIZE {
                    report.warning(format!(
                        "Grid size mismatch: expected {}, got {}",
                        GRID_SIZE, size
                    ));
                }
                size
            }
            None => {
                report.error(format!("Grid size must be an integer, got {}", value));
                GRID_SIZE
            }
        },
    };

    let Some(regions_value) = map.get("regions").filter(|v| !v.is_null()) else {
        report.error("Region data is missing");
        return ImportResult::rejected(report);
    };
    let (region_report, regions) = validate_region_values(regions_value);
    report.merge(region_report);

    let features = match map.get("features") {
        None | Some(Value::Null) => {
            report.warning("Feature data is missing, defaulting to none");
            Vec::new()
        }
        Some(value) => {
            let (feature_report, features) = validate_feature_values(value);
            report.merge(feature_report);
            report.merge(validate_feature_overlaps(&features));
            features
        }
    };

    let metadata = match MapMetadata::deserialize(metadata_value) {
        Ok(m) => Some(m),
        Err(e) => {
            report.error(format!("Metadata: {}", e));
            None
        }
    };

    let settings = match root.get("settings") {
        None | Some(Value::Null) => None,
        Some(value) => match MapSettings::deserialize(value) {
            Ok(s) => Some(s),
            Err(e) => {
                report.error(format!("Settings: {}", e));
                None
            }
        },
    };

    if !report.is_valid {
        return ImportResult::rejected(report);
    }
    let Some(mut metadata) = metadata else {
        return ImportResult::rejected(report);
    };
    metadata.modified = timestamp_now();

    debug!(
        name = %metadata.name,
        regions = regions.len(),
        features = features.len(),
        warnings = report.warnings.len(),
        "Map import accepted"
    );

    ImportResult {
        success: true,
        data: Some(MapExportData {
            version,
            metadata,
            map: MapContent {
                grid_size,
                regions,
                features,
            },
            settings,
        }),
        errors: report.errors,
        warnings: report.warnings,
    }
}

fn has_name(metadata: &Value) -> bool {
    metadata
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty())
}
