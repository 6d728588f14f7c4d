use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::{MapExportData, MapMetadata};
use crate::grid::{GridPosition, RegionWeather};
use crate::map::MapFeature;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    pub from: T,
    pub to: T,
}

/// A feature whose cell is occupied in both documents with different content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureChange {
    pub position: GridPosition,
    pub from: MapFeature,
    pub to: MapFeature,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDiff {
    pub added: Vec<MapFeature>,
    pub removed: Vec<MapFeature>,
    pub modified: Vec<FeatureChange>,
}

impl FeatureDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Differences between two documents.
///
/// `metadata` is keyed by wire field name, `regions` by region index.
/// Modified features carry full snapshots, so a diff cannot be replayed
/// backwards into the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDiff {
    pub metadata: BTreeMap<String, FieldChange<Value>>,
    pub regions: BTreeMap<usize, FieldChange<RegionWeather>>,
    pub features: FeatureDiff,
}

impl MapDiff {
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.regions.is_empty() && self.features.is_empty()
    }
}

pub fn generate_map_diff(original: &MapExportData, modified: &MapExportData) -> MapDiff {
    MapDiff {
        metadata: diff_metadata(&original.metadata, &modified.metadata),
        regions: original
            .map
            .regions
            .iter()
            .zip(&modified.map.regions)
            .enumerate()
            .filter(|(_, (a, b))| a.weather != b.weather)
            .map(|(i, (a, b))| {
                (
                    i,
                    FieldChange {
                        from: a.weather.clone(),
                        to: b.weather.clone(),
                    },
                )
            })
            .collect(),
        features: diff_features(&original.map.features, &modified.map.features),
    }
}

fn diff_metadata(a: &MapMetadata, b: &MapMetadata) -> BTreeMap<String, FieldChange<Value>> {
    let mut changes = BTreeMap::new();
    field(&mut changes, "name", &a.name, &b.name);
    field(&mut changes, "description", &a.description, &b.description);
    field(&mut changes, "author", &a.author, &b.author);
    field(&mut changes, "created", &a.created, &b.created);
    field(&mut changes, "modified", &a.modified, &b.modified);
    field(&mut changes, "gameId", &a.game_id, &b.game_id);
    changes
}

fn field<T: PartialEq + Serialize>(
    changes: &mut BTreeMap<String, FieldChange<Value>>,
    key: &str,
    from: &T,
    to: &T,
) {
    if from != to {
        changes.insert(
            key.to_string(),
            FieldChange {
                from: serde_json::to_value(from).unwrap_or(Value::Null),
                to: serde_json::to_value(to).unwrap_or(Value::Null),
            },
        );
    }
}

/// Features are matched by cell. When a document holds several features on
/// one cell the last one listed represents it.
fn diff_features(original: &[MapFeature], modified: &[MapFeature]) -> FeatureDiff {
    let before = by_position(original);
    let after = by_position(modified);
    let mut diff = FeatureDiff::default();

    for (position, old) in &before {
        match after.get(position) {
            None => diff.removed.push((*old).clone()),
            Some(new) if new != old => diff.modified.push(FeatureChange {
                position: *position,
                from: (*old).clone(),
                to: (*new).clone(),
            }),
            Some(_) => {}
        }
    }
    for (position, new) in &after {
        if !before.contains_key(position) {
            diff.added.push((*new).clone());
        }
    }

    diff
}

fn by_position(features: &[MapFeature]) -> BTreeMap<GridPosition, &MapFeature> {
    features.iter().map(|f| (f.position, f)).collect()
}
