use tracing::warn;

use crate::grid::geometry::canonical_bounds;
use crate::grid::{
    create_default_regions, GridRegion, RegionWeather, WeatherCondition, WindDirection, GRID_SIZE,
};
use crate::map::{Difficulty, FeatureType, MapFeature, MapTemplate};

pub const CLASSIC_CARIBBEAN: &str = "classic-caribbean";
pub const STORMY_WATERS: &str = "stormy-waters";
pub const TREASURE_HUNT: &str = "treasure-hunt";
pub const WAR_ZONE: &str = "war-zone";

/// Ids of the built-in templates, in catalog order.
pub fn template_ids() -> [&'static str; 4] {
    [CLASSIC_CARIBBEAN, STORMY_WATERS, TREASURE_HUNT, WAR_ZONE]
}

pub fn all_templates() -> Vec<MapTemplate> {
    vec![
        classic_caribbean(),
        stormy_waters(),
        treasure_hunt(),
        war_zone(),
    ]
}

/// Look up a built-in template. Unknown ids yield `None`.
pub fn get_template(id: &str) -> Option<MapTemplate> {
    let template = match id {
        CLASSIC_CARIBBEAN => Some(classic_caribbean()),
        STORMY_WATERS => Some(stormy_waters()),
        TREASURE_HUNT => Some(treasure_hunt()),
        WAR_ZONE => Some(war_zone()),
        _ => None,
    };
    if template.is_none() {
        warn!(template_id = id, "Template not found");
    }
    template
}

/// One region preset: id, name, wind, strength, visibility, condition.
type RegionPreset = (u32, &'static str, WindDirection, i32, i32, WeatherCondition);

fn regions_from(presets: [RegionPreset; 4]) -> Vec<GridRegion> {
    presets
        .into_iter()
        .map(|(id, name, wind_direction, wind_strength, visibility, condition)| GridRegion {
            id,
            name: name.to_string(),
            bounds: canonical_bounds(id),
            weather: RegionWeather {
                wind_direction,
                wind_strength,
                visibility,
                conditions: vec![condition],
            },
        })
        .collect()
}

/// Balanced winds and scattered ports. Suited to new players.
pub fn classic_caribbean() -> MapTemplate {
    use WeatherCondition::Clear;

    MapTemplate {
        id: CLASSIC_CARIBBEAN.to_string(),
        name: "Classic Caribbean".to_string(),
        description: "A balanced map with moderate winds and scattered ports. Good for new players."
            .to_string(),
        grid_size: GRID_SIZE,
        difficulty: Difficulty::Beginner,
        regions: regions_from([
            (1, "Eastern Caribbean", WindDirection::E, 2, 85, Clear),
            (2, "Bahamas", WindDirection::NE, 1, 90, Clear),
            (3, "Spanish Main", WindDirection::SE, 2, 80, Clear),
            (4, "Western Caribbean", WindDirection::S, 1, 85, Clear),
        ]),
        default_features: classic_caribbean_features(),
    }
}

/// The four major ports come first; the sparse generator relies on that.
pub(crate) fn classic_caribbean_features() -> Vec<MapFeature> {
    vec![
        MapFeature::new(FeatureType::Port, "Port Royal", 5, 5)
            .with_description("Main trading hub with excellent facilities")
            .with_property("dockingSlots", 8)
            .with_property("tradingPost", true)
            .with_property("repairYard", true)
            .with_property("priceModifier", 1.0),
        MapFeature::new(FeatureType::Port, "Nassau", 15, 3)
            .with_description("Pirate-friendly harbour in the Bahamas")
            .with_property("dockingSlots", 6)
            .with_property("pirateFriendly", true)
            .with_property("blackMarket", true)
            .with_property("priceModifier", 0.8),
        MapFeature::new(FeatureType::Port, "Cartagena", 3, 15)
            .with_description("Spanish colonial port with a military presence")
            .with_property("dockingSlots", 7)
            .with_property("military", true)
            .with_property("tradingPost", true)
            .with_property("priceModifier", 1.2),
        MapFeature::new(FeatureType::Port, "Tortuga", 17, 12)
            .with_description("Infamous pirate haven")
            .with_property("dockingSlots", 5)
            .with_property("pirateFriendly", true)
            .with_property("tavern", true)
            .with_property("priceModifier", 0.9),
        MapFeature::new(FeatureType::Island, "Monkey Island", 8, 8)
            .with_description("Small tropical island")
            .with_property("size", "small")
            .with_property("resources", vec!["fruit", "timber"]),
        MapFeature::new(FeatureType::Island, "Treasure Island", 12, 14)
            .with_description("Mysterious island rumoured to hide treasure")
            .with_property("size", "medium")
            .with_property("treasureRumors", true),
        MapFeature::new(FeatureType::Reef, "Coral Reef", 7, 12)
            .with_description("Dangerous coral formation")
            .with_property("danger", "medium"),
    ]
}

/// Frequent storms and strong winds. For experienced sailors.
pub fn stormy_waters() -> MapTemplate {
    MapTemplate {
        id: STORMY_WATERS.to_string(),
        name: "Stormy Waters".to_string(),
        description:
            "Harsh weather with frequent storms and strong winds. For experienced sailors."
                .to_string(),
        grid_size: GRID_SIZE,
        difficulty: Difficulty::Advanced,
        regions: regions_from([
            (1, "Hurricane Alley", WindDirection::NE, 3, 60, WeatherCondition::Storm),
            (2, "Trade Winds", WindDirection::E, 2, 70, WeatherCondition::Clear),
            (3, "Doldrums", WindDirection::Calm, 0, 95, WeatherCondition::Clear),
            (4, "Fog Banks", WindDirection::W, 1, 40, WeatherCondition::Fog),
        ]),
        default_features: vec![
            MapFeature::new(FeatureType::Port, "Safe Harbor", 10, 10)
                .with_description("The only truly safe port in these waters")
                .with_property("dockingSlots", 12)
                .with_property("stormShelter", true)
                .with_property("repairYard", true)
                .with_property("priceModifier", 1.5),
            MapFeature::new(FeatureType::FogBank, "Eternal Mist", 15, 17)
                .with_description("A thick fog that never lifts")
                .with_property("visibilityReduction", 80)
                .hidden(),
            MapFeature::new(FeatureType::WeatherSystem, "Eye of the Storm", 5, 3)
                .with_description("The eye of a permanent hurricane")
                .with_property("windEffect", "extreme")
                .with_property("danger", "very high"),
            MapFeature::new(FeatureType::Reef, "Shipwreck Reef", 18, 8)
                .with_description("A reef littered with wrecks")
                .with_property("danger", "very high")
                .with_property("salvage", true),
        ],
    }
}

/// Hidden sites and exploration. Uses the default region weather.
pub fn treasure_hunt() -> MapTemplate {
    MapTemplate {
        id: TREASURE_HUNT.to_string(),
        name: "Treasure Hunt".to_string(),
        description: "Built for treasure-hunting adventures, with many hidden locations."
            .to_string(),
        grid_size: GRID_SIZE,
        difficulty: Difficulty::Intermediate,
        regions: create_default_regions(),
        default_features: vec![
            MapFeature::new(FeatureType::Port, "Smugglers' Cove", 2, 18)
                .with_description("A secret port known to few")
                .with_property("dockingSlots", 4)
                .with_property("hidden", true)
                .with_property("blackMarket", true)
                .with_property("priceModifier", 0.7)
                .hidden(),
            MapFeature::new(FeatureType::TreasureSite, "Buried Gold", 16, 5)
                .with_description("X marks the spot")
                .with_property("treasureValue", 1000)
                .with_property("difficulty", "medium")
                .hidden(),
            MapFeature::new(FeatureType::TreasureSite, "Sunken Galleon", 8, 15)
                .with_description("A Spanish treasure ship lies beneath the waves")
                .with_property("treasureValue", 2500)
                .with_property("difficulty", "hard")
                .with_property("underwater", true)
                .hidden(),
            MapFeature::new(FeatureType::Island, "Skull Island", 6, 6)
                .with_description("An ominous island with dark secrets")
                .with_property("size", "small")
                .with_property("treasureRumors", true)
                .with_property("haunted", true),
            MapFeature::new(FeatureType::Island, "Dead Man's Isle", 14, 12)
                .with_description("A small uninhabited island")
                .with_property("size", "tiny")
                .with_property("secretCave", true),
            MapFeature::new(FeatureType::CursedWater, "Devil's Triangle", 11, 7)
                .with_description("Ships that enter are never seen again")
                .with_property("curse", "navigation")
                .with_property("danger", "extreme"),
        ],
    }
}

/// Rival navies and contested waters.
pub fn war_zone() -> MapTemplate {
    use WeatherCondition::{Clear, Storm};

    MapTemplate {
        id: WAR_ZONE.to_string(),
        name: "War Zone".to_string(),
        description: "An active naval theatre with military patrols and hostile waters."
            .to_string(),
        grid_size: GRID_SIZE,
        difficulty: Difficulty::Advanced,
        regions: regions_from([
            (1, "British Waters", WindDirection::W, 2, 80, Clear),
            (2, "Spanish Territory", WindDirection::S, 2, 85, Clear),
            (3, "French Colony", WindDirection::E, 1, 75, Clear),
            (4, "Contested Waters", WindDirection::N, 3, 70, Storm),
        ]),
        default_features: vec![
            MapFeature::new(FeatureType::Port, "HMS Naval Base", 3, 3)
                .with_description("Heavily fortified British naval base")
                .with_property("dockingSlots", 10)
                .with_property("military", true)
                .with_property("british", true)
                .with_property("fortified", true)
                .with_property("priceModifier", 1.3),
            MapFeature::new(FeatureType::Port, "Castillo San Carlos", 17, 4)
                .with_description("Spanish fortress and harbour")
                .with_property("dockingSlots", 8)
                .with_property("military", true)
                .with_property("spanish", true)
                .with_property("fortified", true)
                .with_property("priceModifier", 1.2),
            MapFeature::new(FeatureType::Port, "Fort-de-France", 5, 16)
                .with_description("French colonial stronghold")
                .with_property("dockingSlots", 6)
                .with_property("military", true)
                .with_property("french", true)
                .with_property("priceModifier", 1.1),
            MapFeature::new(FeatureType::Hazard, "Battle Zone", 12, 12)
                .with_description("Active naval warfare")
                .with_property("danger", "extreme")
                .with_property("militaryPatrols", true)
                .with_property("activeWarfare", true),
            MapFeature::new(FeatureType::Island, "Neutral Ground", 10, 8)
                .with_description("Neutral diplomatic territory")
                .with_property("size", "medium")
                .with_property("neutral", true)
                .with_property("diplomacy", true),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_template;

    #[test]
    fn catalog_has_four_templates_in_order() {
        let templates = all_templates();
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, template_ids());
    }

    #[test]
    fn every_template_validates_without_errors() {
        for template in all_templates() {
            let report = validate_template(&template);
            assert!(report.is_valid, "{}: {:?}", template.id, report.errors);
            assert!(report.warnings.is_empty(), "{}: {:?}", template.id, report.warnings);
        }
    }

    #[test]
    fn difficulty_tiers_are_covered() {
        let templates = all_templates();
        for tier in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced] {
            assert!(templates.iter().any(|t| t.difficulty == tier), "no {} template", tier);
        }
    }

    #[test]
    fn lookup_by_id() {
        let template = get_template(STORMY_WATERS).unwrap();
        assert_eq!(template.name, "Stormy Waters");
        assert_eq!(template.regions[2].weather.wind_direction, WindDirection::Calm);
        assert!(get_template("atlantis").is_none());
    }

    #[test]
    fn classic_starts_with_four_ports() {
        let features = classic_caribbean_features();
        assert!(features[..4].iter().all(|f| f.feature_type == FeatureType::Port));
        assert!(features[4..].iter().all(|f| f.feature_type != FeatureType::Port));
    }

    #[test]
    fn treasure_hunt_uses_default_regions() {
        assert_eq!(treasure_hunt().regions, create_default_regions());
    }
}
