use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::grid::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    Island,
    Port,
    Reef,
    Hazard,
    WeatherSystem,
    FogBank,
    CursedWater,
    TreasureSite,
}

impl FeatureType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureType::Island => "ISLAND",
            FeatureType::Port => "PORT",
            FeatureType::Reef => "REEF",
            FeatureType::Hazard => "HAZARD",
            FeatureType::WeatherSystem => "WEATHER_SYSTEM",
            FeatureType::FogBank => "FOG_BANK",
            FeatureType::CursedWater => "CURSED_WATER",
            FeatureType::TreasureSite => "TREASURE_SITE",
        }
    }

    /// Ships may not enter a cell holding this feature.
    pub fn blocks_movement(self) -> bool {
        matches!(self, FeatureType::Island)
    }

    /// Entering the cell is legal but worth a warning.
    pub fn is_dangerous(self) -> bool {
        matches!(
            self,
            FeatureType::Reef | FeatureType::Hazard | FeatureType::CursedWater
        )
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

fn default_visible() -> bool {
    true
}

/// A typed point placement on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFeature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: GridPosition,
    /// Free-form per-type metadata (docking slots, danger rating, ...).
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

impl MapFeature {
    pub fn new(feature_type: FeatureType, name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            feature_type,
            name: name.into(),
            description: None,
            position: GridPosition::new(x, y),
            properties: Map::new(),
            is_visible: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    /// True when `key` is present with a meaningful value: not null,
    /// false, zero or an empty string.
    pub fn has_property(&self, key: &str) -> bool {
        match self.properties.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_wire_format() {
        let feature = MapFeature::new(FeatureType::WeatherSystem, "Eye of the Storm", 5, 3)
            .with_property("danger", "very high");
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["type"], "WEATHER_SYSTEM");
        assert_eq!(value["position"], json!({"x": 5, "y": 3}));
        assert_eq!(value["isVisible"], true);
        assert_eq!(value["properties"]["danger"], "very high");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let feature: MapFeature = serde_json::from_value(json!({
            "type": "FOG_BANK",
            "name": "Everlasting Mist",
            "position": {"x": 15, "y": 17}
        }))
        .unwrap();
        assert!(feature.is_visible);
        assert!(feature.properties.is_empty());
        assert_eq!(feature.description, None);
    }

    #[test]
    fn unknown_feature_type_fails_to_decode() {
        let result = serde_json::from_value::<MapFeature>(json!({
            "type": "VOLCANO",
            "name": "Smoking Peak",
            "position": {"x": 1, "y": 1}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn has_property_follows_truthiness() {
        let feature = MapFeature::new(FeatureType::Port, "Nassau", 15, 3)
            .with_property("dockingSlots", 0)
            .with_property("tavern", true)
            .with_property("note", "")
            .with_property("danger", "low");
        assert!(!feature.has_property("dockingSlots"));
        assert!(feature.has_property("tavern"));
        assert!(!feature.has_property("note"));
        assert!(feature.has_property("danger"));
        assert!(!feature.has_property("absent"));
    }

    #[test]
    fn movement_classification() {
        assert!(FeatureType::Island.blocks_movement());
        assert!(!FeatureType::Port.blocks_movement());
        assert!(FeatureType::Reef.is_dangerous());
        assert!(FeatureType::CursedWater.is_dangerous());
        assert!(!FeatureType::FogBank.is_dangerous());
    }
}
