use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::grid::GridRegion;
use crate::map::MapFeature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!(
                "difficulty must be beginner, intermediate or advanced, got '{}'",
                other
            )),
        }
    }
}

/// A named, reusable seed for a map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub grid_size: i32,
    pub regions: Vec<GridRegion>,
    pub default_features: Vec<MapFeature>,
    pub difficulty: Difficulty,
}
