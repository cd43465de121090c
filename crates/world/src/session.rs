//! Session: one map's live state — dogs, lost objects, and the road index
//! used to clamp their motion.

use crate::dog::Direction;
use crate::dog::Dog;
use crate::geometry::RealPoint;
use crate::geometry::Road;
use crate::map::Map;
use crate::road_index::RoadIndex;
use packfinder_core::DogId;
use packfinder_core::MapId;
use std::collections::VecDeque;

/// A loot item lying on the map, not yet picked up. No standalone id is
/// kept: its position in [`Session::lost_objects`] at the start of a tick
/// *is* its identity for that tick's gather-event indexing (see
/// `manager::process_gather_events`).
#[derive(Debug, Clone)]
pub struct LostObject {
    pub loot_type: i64,
    pub position: RealPoint,
    collected: bool,
}

impl LostObject {
    pub fn new(loot_type: i64, position: RealPoint) -> Self {
        Self {
            loot_type,
            position,
            collected: false,
        }
    }
}

pub struct Session {
    map_id: MapId,
    road_index: RoadIndex,
    dogs: VecDeque<Dog>,
    local_counter: u64,
    lost_objects: Vec<LostObject>,
}

impl Session {
    pub fn new(map: &Map) -> Self {
        Self {
            map_id: map.id().clone(),
            road_index: RoadIndex::build(map.roads()),
            dogs: VecDeque::new(),
            local_counter: 0,
            lost_objects: Vec::new(),
        }
    }

    pub fn map_id(&self) -> &MapId {
        &self.map_id
    }

    pub fn road_index(&self) -> &RoadIndex {
        &self.road_index
    }

    pub fn dogs(&self) -> impl Iterator<Item = &Dog> {
        self.dogs.iter()
    }

    pub fn dogs_mut(&mut self) -> impl Iterator<Item = &mut Dog> {
        self.dogs.iter_mut()
    }

    pub fn dog(&self, id: DogId) -> Option<&Dog> {
        self.dogs.iter().find(|d| d.id() == id)
    }

    pub fn dog_mut(&mut self, id: DogId) -> Option<&mut Dog> {
        self.dogs.iter_mut().find(|d| d.id() == id)
    }

    pub fn dog_count(&self) -> usize {
        self.dogs.len()
    }

    pub fn lost_objects(&self) -> &[LostObject] {
        &self.lost_objects
    }

    /// The position a dog joining without the random-spawn flag lands at:
    /// the start of the first road, or the origin if the map has none.
    pub fn default_spawn_point(map: &Map) -> RealPoint {
        map.roads()
            .first()
            .map(|r| RealPoint::from(r.start()))
            .unwrap_or(RealPoint::ZERO)
    }

    /// A uniformly random point on a uniformly random road, used when the
    /// random-spawn flag is set.
    pub fn random_spawn_point(map: &Map, rng: &mut impl rand::RngCore) -> RealPoint {
        let roads = map.roads();
        if roads.is_empty() {
            return RealPoint::ZERO;
        }
        let road = roads[(rng.next_u32() as usize) % roads.len()];
        let frac = rng.next_u64() as f64 / u64::MAX as f64;
        match road {
            Road::Horizontal { y, x0, x1 } => {
                let (lo, hi) = (x0.min(x1) as f64, x0.max(x1) as f64);
                RealPoint::new(lo + frac * (hi - lo), y as f64)
            }
            Road::Vertical { x, y0, y1 } => {
                let (lo, hi) = (y0.min(y1) as f64, y0.max(y1) as f64);
                RealPoint::new(x as f64, lo + frac * (hi - lo))
            }
        }
    }

    /// Inserts a dog directly (used by snapshot restore), preserving its
    /// saved id, and raising `local_counter` past it if needed.
    pub fn install_dog(&mut self, dog: Dog) {
        self.local_counter = self.local_counter.max(dog.id().value() + 1);
        self.dogs.push_back(dog);
    }

    pub fn add_dog(&mut self, name: impl Into<String>, position: RealPoint) -> DogId {
        let id = DogId::new(self.local_counter);
        self.local_counter += 1;
        self.dogs.push_back(Dog::new(id, name, position));
        id
    }

    pub fn delete_dog(&mut self, id: DogId) -> Option<Dog> {
        let idx = self.dogs.iter().position(|d| d.id() == id)?;
        self.dogs.remove(idx)
    }

    pub fn install_lost_object(&mut self, object: LostObject) {
        self.lost_objects.push(object);
    }

    pub fn spawn_loot(&mut self, loot_type: i64, position: RealPoint) {
        self.lost_objects.push(LostObject {
            loot_type,
            position,
            collected: false,
        });
    }

    /// Advances every dog by `dt_ms` along its current speed, clamping at
    /// road boundaries and zeroing speed on clamp. Returns each dog's
    /// `(start, end)` segment in deque order — the ordering that defines
    /// gatherer indices for this tick's collision pass.
    pub fn apply_motion(&mut self, dt_ms: u64) -> Vec<(RealPoint, RealPoint)> {
        let dt = dt_ms as f64 / 1000.0;
        let mut segments = Vec::with_capacity(self.dogs.len());
        for dog in self.dogs.iter_mut() {
            let start = dog.position();
            let (vx, vy) = dog.speed();
            if vx == 0.0 && vy == 0.0 {
                segments.push((start, start));
                continue;
            }
            let mut target = RealPoint::new(start.x + vx * dt, start.y + vy * dt);
            match dog.direction() {
                Direction::North => {
                    let iv = self.road_index.vertical_interval(start);
                    if target.y < iv.a {
                        target.y = iv.a;
                        dog.stop();
                    }
                }
                Direction::South => {
                    let iv = self.road_index.vertical_interval(start);
                    if target.y > iv.b {
                        target.y = iv.b;
                        dog.stop();
                    }
                }
                Direction::East => {
                    let iv = self.road_index.horizontal_interval(start);
                    if target.x > iv.b {
                        target.x = iv.b;
                        dog.stop();
                    }
                }
                Direction::West => {
                    let iv = self.road_index.horizontal_interval(start);
                    if target.x < iv.a {
                        target.x = iv.a;
                        dog.stop();
                    }
                }
                Direction::None => {}
            }
            dog.set_position(target);
            segments.push((start, target));
        }
        segments
    }

    pub fn is_collected(&self, index: usize) -> bool {
        self.lost_objects.get(index).map(|o| o.collected).unwrap_or(true)
    }

    pub fn mark_collected(&mut self, index: usize) {
        if let Some(o) = self.lost_objects.get_mut(index) {
            o.collected = true;
        }
    }

    /// Drops every object marked collected during the tick's gather-event
    /// processing. Called once, after all events for the tick are applied.
    pub fn sweep_collected(&mut self) {
        self.lost_objects.retain(|o| !o.collected);
    }

    /// Updates play-time and AFK accounting for every dog, returning the
    /// ids that crossed the retirement threshold this tick.
    pub fn afk_and_retire(&mut self, dt_ms: u64, retirement_threshold_ms: u64) -> Vec<DogId> {
        let mut retirees = Vec::new();
        for dog in self.dogs.iter_mut() {
            dog.add_play_time(dt_ms);
            if dog.is_stationary() {
                dog.add_afk_time(dt_ms);
                if dog.afk_time_ms() >= retirement_threshold_ms {
                    retirees.push(dog.id());
                }
            } else {
                dog.reset_afk_time();
            }
        }
        retirees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn flat_map() -> Map {
        let mut map = Map::new(MapId::new("m1"), "test");
        map.add_road(Road::horizontal(Point { x: 0, y: 0 }, 10));
        map.set_dog_speed(2.0);
        map
    }

    #[test]
    fn join_spawns_at_first_road_start() {
        let map = flat_map();
        let mut session = Session::new(&map);
        let id = session.add_dog("rex", Session::default_spawn_point(&map));
        assert_eq!(session.dog(id).unwrap().position(), RealPoint::new(0.0, 0.0));
    }

    #[test]
    fn motion_clamps_at_road_boundary() {
        let map = flat_map();
        let mut session = Session::new(&map);
        let id = session.add_dog("rex", RealPoint::new(9.0, 0.0));
        session.dog_mut(id).unwrap().set_move("R", map.dog_speed());
        let segments = session.apply_motion(2_000);
        assert_eq!(segments[0].1, RealPoint::new(10.5, 0.0));
        assert_eq!(session.dog(id).unwrap().speed(), (0.0, 0.0));
    }

    #[test]
    fn afk_time_accumulates_only_when_stationary() {
        let map = flat_map();
        let mut session = Session::new(&map);
        let id = session.add_dog("rex", RealPoint::ZERO);
        let retirees = session.afk_and_retire(1_000, 500);
        assert_eq!(retirees, vec![id]);
        assert_eq!(session.dog(id).unwrap().play_time_ms(), 1_000);
    }
}
