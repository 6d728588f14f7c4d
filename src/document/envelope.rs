use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grid::{GridRegion, GRID_SIZE};
use crate::map::{Difficulty, MapFeature, MapTemplate};

/// Document format version written by this crate.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Versions `import_map` accepts.
pub const SUPPORTED_VERSIONS: &[&str] = &[CURRENT_VERSION];

/// Current time at millisecond precision, the resolution the wire format
/// carries, so a timestamp survives a JSON round trip unchanged.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "timestamp_now")]
    pub created: DateTime<Utc>,
    #[serde(default = "timestamp_now")]
    pub modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapContent {
    pub grid_size: i32,
    pub regions: Vec<GridRegion>,
    #[serde(default)]
    pub features: Vec<MapFeature>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_of_war: Option<bool>,
}

/// The versioned map document exchanged with storage and clients.
///
/// Documents are never edited in place: export, import and merge each
/// produce a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExportData {
    pub version: String,
    pub metadata: MapMetadata,
    pub map: MapContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MapSettings>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub description: Option<String>,
    pub author: Option<String>,
    /// Included in the document only when set.
    pub settings: Option<MapSettings>,
}

/// Wrap a live map into a new document stamped with the current time.
///
/// Regions and features are copied, so later edits to the caller's map do
/// not reach the exported document.
pub fn export_map(
    game_id: &str,
    name: &str,
    regions: &[GridRegion],
    features: &[MapFeature],
    options: ExportOptions,
) -> MapExportData {
    let now = timestamp_now();
    MapExportData {
        version: CURRENT_VERSION.to_string(),
        metadata: MapMetadata {
            name: name.to_string(),
            description: options.description,
            author: options.author,
            created: now,
            modified: now,
            game_id: Some(game_id.to_string()),
        },
        map: MapContent {
            grid_size: GRID_SIZE,
            regions: regions.to_vec(),
            features: features.to_vec(),
        },
        settings: options.settings,
    }
}

/// Export a template as a document with weather and fog of war enabled.
/// Without a game id the document is tagged `template-<template id>`.
pub fn template_to_export(
    template: &MapTemplate,
    author: Option<&str>,
    game_id: Option<&str>,
) -> MapExportData {
    let game_id = game_id
        .map(str::to_string)
        .unwrap_or_else(|| format!("template-{}", template.id));

    export_map(
        &game_id,
        &template.name,
        &template.regions,
        &template.default_features,
        ExportOptions {
            description: Some(template.description.clone()),
            author: author.map(str::to_string),
            settings: Some(MapSettings {
                difficulty: Some(template.difficulty.to_string()),
                weather_enabled: Some(true),
                fog_of_war: Some(true),
            }),
        },
    )
}

/// Turn a document back into a reusable template.
///
/// Unknown or absent difficulty settings fall back to intermediate.
pub fn export_to_template(doc: &MapExportData) -> MapTemplate {
    let difficulty = doc
        .settings
        .as_ref()
        .and_then(|s| s.difficulty.as_deref())
        .and_then(|d| d.parse::<Difficulty>().ok())
        .unwrap_or(Difficulty::Intermediate);

    MapTemplate {
        id: format!("imported-{}", Uuid::new_v4().simple()),
        name: doc.metadata.name.clone(),
        description: doc
            .metadata
            .description
            .clone()
            .unwrap_or_else(|| "Imported map".to_string()),
        grid_size: doc.map.grid_size,
        regions: doc.map.regions.clone(),
        default_features: doc.map.features.clone(),
        difficulty,
    }
}
