use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// === Enums ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    Water,
    Shallow,
    Island,
    Port,
    Reef,
}

/// Eight compass points plus a calm marker.
///
/// Doubles as the wind direction tag of a region and as the bearing bucket
/// returned by `get_compass_direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Calm,
}

impl WindDirection {
    pub const COMPASS: [WindDirection; 8] = [
        WindDirection::E,
        WindDirection::SE,
        WindDirection::S,
        WindDirection::SW,
        WindDirection::W,
        WindDirection::NW,
        WindDirection::N,
        WindDirection::NE,
    ];

    /// Centre of this direction's 45° bucket in screen convention
    /// (0° = east, angles grow clockwise because y grows downward).
    pub fn bearing_degrees(self) -> Option<f64> {
        match self {
            WindDirection::E => Some(0.0),
            WindDirection::SE => Some(45.0),
            WindDirection::S => Some(90.0),
            WindDirection::SW => Some(135.0),
            WindDirection::W => Some(180.0),
            WindDirection::NW => Some(225.0),
            WindDirection::N => Some(270.0),
            WindDirection::NE => Some(315.0),
            WindDirection::Calm => None,
        }
    }

    /// Bucket an angle into one of the eight compass points.
    ///
    /// Any finite angle is accepted and normalized into [0, 360).
    /// Non-finite input yields `Calm`.
    pub fn from_bearing(degrees: f64) -> WindDirection {
        if !degrees.is_finite() {
            return WindDirection::Calm;
        }
        let normalized = degrees.rem_euclid(360.0);
        let bucket = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::COMPASS[bucket]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
            WindDirection::Calm => "CALM",
        }
    }
}

impl std::fmt::Display for WindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Fog,
    Storm,
    Cursed,
}

impl WeatherCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Fog => "fog",
            WeatherCondition::Storm => "storm",
            WeatherCondition::Cursed => "cursed",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// === Position ===

/// Integer cell coordinate. Signed so that out-of-grid input (negative
/// steps in a path, malformed documents) can still be represented and
/// reported instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// === Cells and regions ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub region: u32,
    pub terrain: TerrainType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RegionBounds {
    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionWeather {
    pub wind_direction: WindDirection,
    /// 0 (still) to 3 (gale).
    #[serde(deserialize_with = "whole_number")]
    pub wind_strength: i32,
    /// Percentage, 0 to 100.
    #[serde(deserialize_with = "whole_number")]
    pub visibility: i32,
    pub conditions: Vec<WeatherCondition>,
}

/// Accepts any JSON number with no fractional part, so `85` and `85.0` both
/// decode while `85.5` is rejected.
fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if !value.is_finite() || value.fract() != 0.0 || !in_range {
        return Err(D::Error::custom(format!(
            "expected a whole number, got {}",
            value
        )));
    }
    Ok(value as i32)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRegion {
    pub id: u32,
    pub name: String,
    pub bounds: RegionBounds,
    pub weather: RegionWeather,
}
