use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::envelope::{timestamp_now, MapExportData};
use crate::grid::GridPosition;

/// Controls how [`merge_maps`] combines two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    /// Append overlay features that do not collide with a base feature.
    #[serde(default = "default_merge_features")]
    pub merge_features: bool,
    /// Take region weather from the overlay. Only applies together with
    /// `prefer_overlay`.
    #[serde(default)]
    pub merge_weather: bool,
    /// Use the overlay's name and description instead of combining them.
    #[serde(default)]
    pub prefer_overlay: bool,
}

fn default_merge_features() -> bool {
    true
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            merge_features: default_merge_features(),
            merge_weather: false,
            prefer_overlay: false,
        }
    }
}

/// Combine `overlay` into a copy of `base`.
///
/// Base features always survive; an overlay feature is dropped when any base
/// feature occupies its cell. Neither operand is modified.
pub fn merge_maps(
    base: &MapExportData,
    overlay: &MapExportData,
    options: &MergeOptions,
) -> MapExportData {
    let mut result = base.clone();

    if options.prefer_overlay {
        result.metadata.name = overlay.metadata.name.clone();
        result.metadata.description = overlay.metadata.description.clone();
    } else {
        result.metadata.name = format!("{} + {}", base.metadata.name, overlay.metadata.name);
    }
    result.metadata.modified = timestamp_now();

    if options.merge_weather && options.prefer_overlay {
        for (region, source) in result.map.regions.iter_mut().zip(&overlay.map.regions) {
            region.weather = source.weather.clone();
        }
    }

    if options.merge_features {
        let occupied: HashSet<GridPosition> =
            base.map.features.iter().map(|f| f.position).collect();
        result.map.features.extend(
            overlay
                .map
                .features
                .iter()
                .filter(|f| !occupied.contains(&f.position))
                .cloned(),
        );
    }

    result
}
