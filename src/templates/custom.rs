use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::classic_caribbean_features;
use crate::grid::{create_default_regions, GridRegion, WeatherCondition, GRID_SIZE};
use crate::map::{Difficulty, FeatureType, MapFeature, MapTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIntensity {
    Calm,
    Moderate,
    Stormy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeatureDensity {
    Sparse,
    Normal,
    Dense,
}

impl std::fmt::Display for WeatherIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            WeatherIntensity::Calm => "calm",
            WeatherIntensity::Moderate => "moderate",
            WeatherIntensity::Stormy => "stormy",
        })
    }
}

impl std::fmt::Display for FeatureDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            FeatureDensity::Sparse => "sparse",
            FeatureDensity::Normal => "normal",
            FeatureDensity::Dense => "dense",
        })
    }
}

// Calm clamps toward clear skies, stormy toward storm and fog.
const CALM_MAX_WIND: i32 = 1;
const CALM_MIN_VISIBILITY: i32 = 90;
const STORMY_MIN_WIND: i32 = 2;
const STORMY_MAX_VISIBILITY: i32 = 60;

/// Number of leading major ports kept by a sparse map.
const SPARSE_FEATURE_COUNT: usize = 4;

/// Build a template from the default regions and the classic feature set,
/// reshaped by weather intensity and feature density.
///
/// Every combination produces a template that passes `validate_template`.
pub fn create_custom_template(
    name: &str,
    difficulty: Difficulty,
    weather: WeatherIntensity,
    density: FeatureDensity,
) -> MapTemplate {
    MapTemplate {
        id: format!("custom-{}", Uuid::new_v4().simple()),
        name: name.to_string(),
        description: format!(
            "Custom map with {} difficulty, {} weather and {} features",
            difficulty, weather, density
        ),
        grid_size: GRID_SIZE,
        difficulty,
        regions: regions_for_intensity(weather),
        default_features: features_for_density(density),
    }
}

pub fn regions_for_intensity(intensity: WeatherIntensity) -> Vec<GridRegion> {
    let mut regions = create_default_regions();
    match intensity {
        WeatherIntensity::Calm => {
            for region in &mut regions {
                let w = &mut region.weather;
                w.wind_strength = w.wind_strength.min(CALM_MAX_WIND);
                w.visibility = w.visibility.max(CALM_MIN_VISIBILITY);
                w.conditions = vec![WeatherCondition::Clear];
            }
        }
        WeatherIntensity::Stormy => {
            for region in &mut regions {
                let w = &mut region.weather;
                w.wind_strength = w.wind_strength.max(STORMY_MIN_WIND);
                w.visibility = w.visibility.min(STORMY_MAX_VISIBILITY);
                w.conditions = vec![WeatherCondition::Storm, WeatherCondition::Fog];
            }
        }
        WeatherIntensity::Moderate => {}
    }
    regions
}

pub fn features_for_density(density: FeatureDensity) -> Vec<MapFeature> {
    let mut features = classic_caribbean_features();
    match density {
        FeatureDensity::Sparse => features.truncate(SPARSE_FEATURE_COUNT),
        FeatureDensity::Normal => {}
        FeatureDensity::Dense => features.extend(dense_extras()),
    }
    features
}

fn dense_extras() -> Vec<MapFeature> {
    vec![
        MapFeature::new(FeatureType::Island, "Mystery Isle", 4, 9).with_property("size", "small"),
        MapFeature::new(FeatureType::Reef, "Outer Reef", 13, 6).with_property("danger", "high"),
        MapFeature::new(FeatureType::Port, "Trading House", 8, 16)
            .with_property("dockingSlots", 3)
            .with_property("tradingPost", true),
    ]
}
