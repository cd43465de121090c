//! Map configuration file loading.
//!
//! Parses the JSON format described by §6 of the external contract: a
//! root object holding a global `lootGeneratorConfig`, an optional
//! `dogRetirementTime` (seconds, default 60), global `defaultDogSpeed` /
//! `defaultBagCapacity` fallbacks, and a `maps` array. Each map entry may
//! override the speed/bag-capacity globals with its own `dogSpeed` /
//! `bagCapacity` field.

use packfinder_core::Error;
use packfinder_world::geometry::Office;
use packfinder_world::geometry::Point;
use packfinder_world::geometry::Rectangle;
use packfinder_world::geometry::Road;
use packfinder_world::map::Catalog;
use packfinder_world::map::LootType;
use packfinder_world::map::Map;
use packfinder_world::map::LootGeneratorConfig;
use packfinder_core::MapId;
use packfinder_core::OfficeId;
use serde_json::Value;
use std::path::Path;

const DEFAULT_RETIREMENT_TIME_SECONDS: f64 = 60.0;

pub struct LoadedConfig {
    pub catalog: Catalog,
    pub retirement_time_ms: u64,
}

pub fn load_from_path(path: &Path) -> Result<LoadedConfig, Error> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::ParseError(format!("failed to read {}: {e}", path.display())))?;
    load_from_str(&raw)
}

pub fn load_from_str(raw: &str) -> Result<LoadedConfig, Error> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| Error::ParseError(format!("invalid json: {e}")))?;
    let root = root
        .as_object()
        .ok_or_else(|| Error::ParseError("config root must be an object".into()))?;

    let loot_generator_config = parse_loot_generator_config(root)?;
    let retirement_time_ms = (parse_retirement_time_seconds(root) * 1000.0) as u64;

    let mut catalog = Catalog::new();
    catalog.set_loot_generator_config(loot_generator_config);

    let maps = root
        .get("maps")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::ParseError("missing 'maps' array".into()))?;

    for entry in maps {
        let dict = entry
            .as_object()
            .ok_or_else(|| Error::ParseError("map entry must be an object".into()))?;
        let id = dict
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ParseError("map entry missing 'id'".into()))?;
        let name = dict
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ParseError("map entry missing 'name'".into()))?;
        let map_id = MapId::new(id);
        let mut map = Map::new(map_id.clone(), name);

        add_roads(&mut map, dict)?;
        add_buildings(&mut map, dict)?;
        add_offices(&mut map, dict)?;
        apply_dog_speed(&mut map, dict, root);
        apply_bag_capacity(&mut map, dict, root);

        let loot_types = parse_loot_types(dict)?;
        catalog.set_loot_types(map_id, loot_types);
        catalog.add_map(map)?;
    }

    Ok(LoadedConfig {
        catalog,
        retirement_time_ms,
    })
}

fn add_roads(map: &mut Map, dict: &serde_json::Map<String, Value>) -> Result<(), Error> {
    let roads = dict
        .get("roads")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::ParseError("map entry missing 'roads'".into()))?;
    for road in roads {
        let road = road
            .as_object()
            .ok_or_else(|| Error::ParseError("road entry must be an object".into()))?;
        let x0 = require_i32(road, "x0")?;
        let y0 = require_i32(road, "y0")?;
        let start = Point { x: x0, y: y0 };
        if let Some(y1) = road.get("y1").and_then(Value::as_i64) {
            map.add_road(Road::vertical(start, y1 as i32));
        } else {
            let x1 = require_i32(road, "x1")?;
            map.add_road(Road::horizontal(start, x1));
        }
    }
    Ok(())
}

fn add_buildings(map: &mut Map, dict: &serde_json::Map<String, Value>) -> Result<(), Error> {
    let Some(buildings) = dict.get("buildings").and_then(Value::as_array) else {
        return Ok(());
    };
    for building in buildings {
        let building = building
            .as_object()
            .ok_or_else(|| Error::ParseError("building entry must be an object".into()))?;
        map.add_building(Rectangle {
            position: Point {
                x: require_i32(building, "x")?,
                y: require_i32(building, "y")?,
            },
            width: require_i32(building, "w")?,
            height: require_i32(building, "h")?,
        });
    }
    Ok(())
}

fn add_offices(map: &mut Map, dict: &serde_json::Map<String, Value>) -> Result<(), Error> {
    let Some(offices) = dict.get("offices").and_then(Value::as_array) else {
        return Ok(());
    };
    for office in offices {
        let office = office
            .as_object()
            .ok_or_else(|| Error::ParseError("office entry must be an object".into()))?;
        let id = office
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ParseError("office entry missing 'id'".into()))?;
        map.add_office(Office {
            id: OfficeId::new(id),
            position: Point {
                x: require_i32(office, "x")?,
                y: require_i32(office, "y")?,
            },
            offset: (require_i32(office, "offsetX")?, require_i32(office, "offsetY")?),
        });
    }
    Ok(())
}

fn apply_dog_speed(map: &mut Map, dict: &serde_json::Map<String, Value>, root: &serde_json::Map<String, Value>) {
    if let Some(default_speed) = root.get("defaultDogSpeed").and_then(Value::as_f64) {
        map.set_dog_speed(default_speed);
    }
    if let Some(speed) = dict.get("dogSpeed").and_then(Value::as_f64) {
        map.set_dog_speed(speed);
    }
}

fn apply_bag_capacity(map: &mut Map, dict: &serde_json::Map<String, Value>, root: &serde_json::Map<String, Value>) {
    if let Some(default_capacity) = root.get("defaultBagCapacity").and_then(Value::as_u64) {
        map.set_bag_capacity(default_capacity as usize);
    }
    if let Some(capacity) = dict.get("bagCapacity").and_then(Value::as_u64) {
        map.set_bag_capacity(capacity as usize);
    }
}

fn parse_loot_types(dict: &serde_json::Map<String, Value>) -> Result<Vec<LootType>, Error> {
    let types = dict
        .get("lootTypes")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::ParseError("map entry missing 'lootTypes'".into()))?;
    Ok(types.iter().cloned().map(LootType::from_json).collect())
}

fn parse_loot_generator_config(root: &serde_json::Map<String, Value>) -> Result<LootGeneratorConfig, Error> {
    let config = root
        .get("lootGeneratorConfig")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::ParseError("missing 'lootGeneratorConfig'".into()))?;
    let period_seconds = config
        .get("period")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::ParseError("lootGeneratorConfig missing 'period'".into()))?;
    let probability = config
        .get("probability")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::ParseError("lootGeneratorConfig missing 'probability'".into()))?;
    Ok(LootGeneratorConfig {
        period_ms: (period_seconds * 1000.0) as u64,
        probability,
    })
}

fn parse_retirement_time_seconds(root: &serde_json::Map<String, Value>) -> f64 {
    root.get("dogRetirementTime")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_RETIREMENT_TIME_SECONDS)
}

fn require_i32(dict: &serde_json::Map<String, Value>, key: &str) -> Result<i32, Error> {
    dict.get(key)
        .and_then(Value::as_i64)
        .map(|v| v as i32)
        .ok_or_else(|| Error::ParseError(format!("missing or malformed '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "defaultDogSpeed": 2.0,
        "defaultBagCapacity": 2,
        "lootGeneratorConfig": { "period": 1.5, "probability": 0.4 },
        "dogRetirementTime": 45.0,
        "maps": [
            {
                "id": "map1",
                "name": "First",
                "roads": [{"x0": 0, "y0": 0, "x1": 10}],
                "buildings": [{"x": 1, "y": 1, "w": 2, "h": 2}],
                "offices": [{"id": "o0", "x": 5, "y": 0, "offsetX": 0, "offsetY": 1}],
                "dogSpeed": 3.0,
                "lootTypes": [{"name": "key", "value": 20}]
            }
        ]
    }"#;

    #[test]
    fn loads_maps_and_overrides() {
        let loaded = load_from_str(SAMPLE).unwrap();
        assert_eq!(loaded.retirement_time_ms, 45_000);
        let config = loaded.catalog.loot_generator_config();
        assert_eq!(config.period_ms, 1_500);
        assert!((config.probability - 0.4).abs() < 1e-9);
        let map = loaded.catalog.find(&MapId::new("map1")).unwrap();
        assert_eq!(map.dog_speed(), 3.0);
        assert_eq!(map.bag_capacity(), 2);
        assert_eq!(map.roads().len(), 1);
        assert_eq!(map.offices().len(), 1);
        assert_eq!(loaded.catalog.loot_types(&MapId::new("map1")).len(), 1);
    }

    #[test]
    fn missing_maps_array_is_parse_error() {
        let err = load_from_str(r#"{"lootGeneratorConfig": {"period": 1.0, "probability": 0.5}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
