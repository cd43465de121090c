//! Map model: the immutable description of one playable map.

use crate::geometry::Office;
use crate::geometry::Rectangle;
use crate::geometry::Road;
use packfinder_core::MapId;
use std::collections::HashMap;

/// Default dog speed (units/sec) when neither the top-level nor per-map
/// override is present.
pub const DEFAULT_DOG_SPEED: f64 = 1.0;
/// Default bag capacity when neither override is present.
pub const DEFAULT_BAG_CAPACITY: usize = 3;

/// One loot kind spawnable on a given map. The configuration format allows
/// arbitrary client-facing fields; only `value` is meaningful to the core.
#[derive(Debug, Clone)]
pub struct LootType {
    pub value: i64,
    pub raw: serde_json::Value,
}

impl LootType {
    pub fn from_json(raw: serde_json::Value) -> Self {
        let value = raw.get("value").and_then(|v| v.as_i64()).unwrap_or(0);
        Self { value, raw }
    }
}

/// A single playable map: roads, buildings, offices, and per-map tuning.
#[derive(Debug, Clone)]
pub struct Map {
    id: MapId,
    name: String,
    roads: Vec<Road>,
    buildings: Vec<Rectangle>,
    offices: Vec<Office>,
    dog_speed: f64,
    bag_capacity: usize,
}

impl Map {
    pub fn new(id: MapId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roads: Vec::new(),
            buildings: Vec::new(),
            offices: Vec::new(),
            dog_speed: DEFAULT_DOG_SPEED,
            bag_capacity: DEFAULT_BAG_CAPACITY,
        }
    }

    pub fn id(&self) -> &MapId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }
    pub fn buildings(&self) -> &[Rectangle] {
        &self.buildings
    }
    pub fn offices(&self) -> &[Office] {
        &self.offices
    }
    pub fn dog_speed(&self) -> f64 {
        self.dog_speed
    }
    pub fn bag_capacity(&self) -> usize {
        self.bag_capacity
    }

    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
    }
    pub fn add_building(&mut self, building: Rectangle) {
        self.buildings.push(building);
    }
    pub fn add_office(&mut self, office: Office) {
        self.offices.push(office);
    }
    pub fn set_dog_speed(&mut self, speed: f64) {
        self.dog_speed = speed;
    }
    pub fn set_bag_capacity(&mut self, capacity: usize) {
        self.bag_capacity = capacity;
    }
}

/// Loot spawn tuning, parsed from the configuration file's top-level
/// `lootGeneratorConfig` and shared by every map.
#[derive(Debug, Clone, Copy)]
pub struct LootGeneratorConfig {
    pub period_ms: u64,
    pub probability: f64,
}

impl Default for LootGeneratorConfig {
    fn default() -> Self {
        Self {
            period_ms: 5_000,
            probability: 0.5,
        }
    }
}

/// The full catalogue of maps loaded from the configuration file, plus the
/// process-wide loot generator config and retirement timeout that travel
/// alongside it.
#[derive(Debug, Default)]
pub struct Catalog {
    maps: HashMap<MapId, Map>,
    order: Vec<MapId>,
    loot_types: HashMap<MapId, Vec<LootType>>,
    loot_generator_config: LootGeneratorConfig,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loot_generator_config(&self) -> LootGeneratorConfig {
        self.loot_generator_config
    }

    pub fn set_loot_generator_config(&mut self, config: LootGeneratorConfig) {
        self.loot_generator_config = config;
    }

    /// Inserts a map. A duplicate id is a configuration bug caught at load
    /// time, so this returns an error rather than silently overwriting.
    pub fn add_map(&mut self, map: Map) -> Result<(), packfinder_core::Error> {
        if self.maps.contains_key(&map.id) {
            return Err(packfinder_core::Error::InternalError(format!(
                "duplicate map id: {}",
                map.id
            )));
        }
        self.order.push(map.id.clone());
        self.maps.insert(map.id.clone(), map);
        Ok(())
    }

    pub fn set_loot_types(&mut self, map_id: MapId, types: Vec<LootType>) {
        self.loot_types.insert(map_id, types);
    }

    pub fn loot_types(&self, map_id: &MapId) -> &[LootType] {
        self.loot_types
            .get(map_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, id: &MapId) -> Option<&Map> {
        self.maps.get(id)
    }

    /// All maps, in the order they were loaded (the order the `/maps`
    /// listing endpoint must preserve).
    pub fn iter(&self) -> impl Iterator<Item = &Map> {
        self.order.iter().filter_map(|id| self.maps.get(id))
    }
}
