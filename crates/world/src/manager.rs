//! Session Manager: the process-wide orchestrator. Maps `map_id` to
//! session, owns player/token bookkeeping, and drives the tick.

use crate::collision::Gatherer;
use crate::collision::Item;
use crate::collision::find_gather_events;
use crate::dog::BagItem;
use crate::geometry::RealPoint;
use crate::map::Catalog;
use crate::map::Map;
use crate::session::Session;
use packfinder_core::DogId;
use packfinder_core::Error;
use packfinder_core::MapId;
use packfinder_core::Token;
use std::collections::HashMap;

/// Radius a dog's movement segment collides with during gather processing.
pub const DOG_RADIUS: f64 = 0.3;
/// Radius a lost object presents as a collision target.
pub const LOOT_RADIUS: f64 = 0.0;
/// Radius an office presents as a collision (delivery) target.
pub const OFFICE_RADIUS: f64 = 0.25;
/// Default contiguous-AFK threshold before a dog is retired, in ms.
pub const DEFAULT_RETIREMENT_TIME_MS: u64 = 60_000;

#[derive(Debug, Clone)]
pub struct Player {
    pub token: Token,
    pub map_id: MapId,
    pub dog_id: DogId,
}

/// A retired dog's final record, handed to the leaderboard sink.
#[derive(Debug, Clone)]
pub struct RetiredRecord {
    pub name: String,
    pub score: u64,
    pub play_time_seconds: f64,
}

/// Ranked retirement leaderboard. Implemented against a durable store
/// (e.g. Postgres) outside this crate; the manager only ever calls these
/// three operations.
#[async_trait::async_trait]
pub trait RetirementSink: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), Error>;
    async fn add(&self, record: RetiredRecord) -> Result<(), Error>;
    async fn get(&self, offset: usize, limit: usize) -> Result<Vec<RetiredRecord>, Error>;
}

/// Broadcasts tick completion; the snapshot listener is the only consumer
/// in this crate, but the trait keeps the manager decoupled from it.
pub trait TickListener {
    fn on_tick(&mut self, dt_ms: u64);
}

impl TickListener for () {
    fn on_tick(&mut self, _dt_ms: u64) {}
}

/// The RNG implementation wired up by the binary. A concrete alias keeps
/// the HTTP layer and bootstrap code from needing to be generic over `R`
/// themselves.
pub type DefaultRng = rand::rngs::SmallRng;

pub struct SessionManager<R> {
    catalog: Catalog,
    sessions: HashMap<MapId, Session>,
    players_by_token: HashMap<Token, Player>,
    randomize_spawn_points: bool,
    retirement_time_ms: u64,
    rng: R,
}

impl<R: rand::RngCore> SessionManager<R> {
    pub fn new(catalog: Catalog, randomize_spawn_points: bool, rng: R) -> Self {
        Self {
            catalog,
            sessions: HashMap::new(),
            players_by_token: HashMap::new(),
            randomize_spawn_points,
            retirement_time_ms: DEFAULT_RETIREMENT_TIME_MS,
            rng,
        }
    }

    pub fn set_retirement_time_ms(&mut self, ms: u64) {
        self.retirement_time_ms = ms;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self, map_id: &MapId) -> Option<&Session> {
        self.sessions.get(map_id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn find_player(&self, token: &Token) -> Option<&Player> {
        self.players_by_token.get(token)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players_by_token.values()
    }

    pub fn players_in_map(&self, map_id: &MapId) -> impl Iterator<Item = &Player> {
        self.players_by_token.values().filter(move |p| &p.map_id == map_id)
    }

    fn session_mut_or_create(&mut self, map_id: &MapId) -> Option<&mut Session> {
        if !self.sessions.contains_key(map_id) {
            let map = self.catalog.find(map_id)?;
            self.sessions.insert(map_id.clone(), Session::new(map));
        }
        self.sessions.get_mut(map_id)
    }

    /// Joins `name` to the session for `map_id`, creating the session on
    /// first use. Fails with `MapNotFound` for an unknown map, or
    /// `InvalidName` for an empty name.
    pub fn join(&mut self, name: &str, map_id: &MapId) -> Result<(Token, DogId), Error> {
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        let map = self
            .catalog
            .find(map_id)
            .ok_or_else(|| Error::MapNotFound(map_id.to_string()))?
            .clone();
        let spawn = if self.randomize_spawn_points {
            Session::random_spawn_point(&map, &mut self.rng)
        } else {
            Session::default_spawn_point(&map)
        };
        let session = self
            .session_mut_or_create(map_id)
            .expect("map existence just verified above");
        let dog_id = session.add_dog(name, spawn);

        let mut token = Token::generate(&mut self.rng);
        while self.players_by_token.contains_key(&token) {
            token = Token::generate(&mut self.rng);
        }
        self.players_by_token.insert(
            token.clone(),
            Player {
                token: token.clone(),
                map_id: map_id.clone(),
                dog_id,
            },
        );
        Ok((token, dog_id))
    }

    /// Applies a move command ("" | "U" | "D" | "L" | "R") for the dog
    /// owned by `token`. Any other command is rejected as `InvalidAction`
    /// rather than silently treated as a stop.
    pub fn set_move(&mut self, token: &Token, command: &str) -> Result<(), Error> {
        if !matches!(command, "" | "U" | "D" | "L" | "R") {
            return Err(Error::InvalidAction(command.to_owned()));
        }
        let player = self
            .players_by_token
            .get(token)
            .ok_or(Error::UnknownToken)?
            .clone();
        let speed = self
            .catalog
            .find(&player.map_id)
            .map(|m| m.dog_speed())
            .unwrap_or(crate::map::DEFAULT_DOG_SPEED);
        let session = self
            .sessions
            .get_mut(&player.map_id)
            .ok_or(Error::UnknownToken)?;
        let dog = session.dog_mut(player.dog_id).ok_or(Error::UnknownToken)?;
        dog.set_move(command, speed);
        Ok(())
    }

    /// Advances the whole world by `dt_ms`: per session, in insertion
    /// order, generate loot, move dogs, process gather events, check
    /// AFK/retire. Each retiree's record is captured and written to
    /// `leaderboard` *before* the dog is removed; a write failure aborts
    /// the tick and leaves that dog (and any not yet visited) in place.
    pub async fn tick(
        &mut self,
        dt_ms: u64,
        leaderboard: &dyn RetirementSink,
    ) -> Result<(), Error> {
        let map_ids: Vec<MapId> = self.sessions.keys().cloned().collect();

        for map_id in map_ids {
            let Some(map) = self.catalog.find(&map_id).cloned() else {
                continue;
            };
            let loot_config = self.catalog.loot_generator_config();
            let session = self.sessions.get_mut(&map_id).expect("just listed");

            let loot_count = session.lost_objects().len();
            let looter_count = session.dog_count();
            let draw = self.rng.next_u64() as f64 / u64::MAX as f64;
            let spawn_count = crate::loot::compute_spawn_count(
                dt_ms,
                loot_count,
                looter_count,
                loot_config.period_ms,
                loot_config.probability,
                draw,
            );
            let loot_types = self.catalog.loot_types(&map_id);
            if !loot_types.is_empty() {
                for _ in 0..spawn_count {
                    let type_idx = (self.rng.next_u32() as usize) % loot_types.len();
                    let position = Session::random_spawn_point(&map, &mut self.rng);
                    session.spawn_loot(type_idx as i64, position);
                }
            }

            let segments = session.apply_motion(dt_ms);
            process_gather_events(session, &map, &self.catalog, &segments);

            let retirees = session.afk_and_retire(dt_ms, self.retirement_time_ms);
            for dog_id in retirees {
                let Some(dog) = session.dog(dog_id) else {
                    continue;
                };
                let record = RetiredRecord {
                    name: dog.name().to_owned(),
                    score: dog.score(),
                    play_time_seconds: dog.play_time_ms() as f64 / 1000.0,
                };
                leaderboard.add(record).await?;
                session.delete_dog(dog_id);
                self.players_by_token
                    .retain(|_, p| !(p.map_id == map_id && p.dog_id == dog_id));
            }
        }
        Ok(())
    }

    /// Installs a player restored from a snapshot, bypassing `join`'s
    /// side effects (no new dog, no new token draw).
    pub fn install_player(&mut self, player: Player) {
        self.players_by_token.insert(player.token.clone(), player);
    }

    pub fn session_mut(&mut self, map_id: &MapId) -> Option<&mut Session> {
        self.sessions.get_mut(map_id)
    }

    pub fn ensure_session(&mut self, map_id: &MapId) -> Option<&mut Session> {
        self.session_mut_or_create(map_id)
    }
}

/// Builds the gatherer/item provider for one session's tick from its
/// already-computed motion segments, and applies pickups and deliveries in
/// chronological order.
fn process_gather_events(
    session: &mut Session,
    map: &Map,
    catalog: &Catalog,
    segments: &[(RealPoint, RealPoint)],
) {
    let dogs: Vec<DogId> = session.dogs().map(|d| d.id()).collect();
    let gatherers: Vec<Gatherer> = segments
        .iter()
        .map(|(start, end)| Gatherer {
            start: *start,
            end: *end,
            radius: DOG_RADIUS,
        })
        .collect();
    let lost_len = session.lost_objects().len();
    let mut items: Vec<Item> = session
        .lost_objects()
        .iter()
        .map(|o| Item {
            pos: o.position,
            radius: LOOT_RADIUS,
        })
        .collect();
    items.extend(map.offices().iter().map(|o| Item {
        pos: RealPoint::from(o.position),
        radius: OFFICE_RADIUS,
    }));

    let events = find_gather_events(&gatherers, &items);
    let bag_capacity = map.bag_capacity();
    let map_id = session.map_id().clone();

    for event in events {
        let Some(dog_id) = dogs.get(event.gatherer_id).copied() else {
            continue;
        };
        if event.item_id >= lost_len {
            let Some(dog) = session.dog_mut(dog_id) else {
                continue;
            };
            let released = dog.release_bag();
            let mut gained = 0i64;
            for item in &released {
                gained += catalog
                    .loot_types(&map_id)
                    .get(item.loot_type as usize)
                    .map(|lt| lt.value)
                    .unwrap_or(0);
            }
            if let Some(dog) = session.dog_mut(dog_id) {
                dog.add_score(gained);
            }
        } else {
            if session.is_collected(event.item_id) {
                continue;
            }
            let bag_full = session
                .dog(dog_id)
                .map(|d| d.bag_is_full(bag_capacity))
                .unwrap_or(true);
            if bag_full {
                continue;
            }
            let loot_type = session.lost_objects()[event.item_id].loot_type;
            if let Some(dog) = session.dog_mut(dog_id) {
                dog.add_to_bag(BagItem {
                    id: event.item_id,
                    loot_type,
                });
            }
            session.mark_collected(event.item_id);
        }
    }
    session.sweep_collected();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::geometry::Road;
    use crate::map::LootType;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn single_road_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let mut map = Map::new(MapId::new("m1"), "test");
        map.add_road(Road::horizontal(Point { x: 0, y: 0 }, 10));
        map.set_dog_speed(1.0);
        catalog.add_map(map).unwrap();
        catalog.set_loot_types(
            MapId::new("m1"),
            vec![LootType::from_json(serde_json::json!({"value": 10}))],
        );
        catalog
    }

    fn catalog_with_office() -> Catalog {
        let mut catalog = Catalog::new();
        let mut map = Map::new(MapId::new("m1"), "test");
        map.add_road(Road::horizontal(Point { x: 0, y: 0 }, 10));
        map.add_office(crate::geometry::Office {
            id: packfinder_core::OfficeId::new("o1"),
            position: Point { x: 6, y: 0 },
            offset: (0, 0),
        });
        map.set_dog_speed(1.0);
        catalog.add_map(map).unwrap();
        catalog.set_loot_types(
            MapId::new("m1"),
            vec![LootType::from_json(serde_json::json!({"value": 10}))],
        );
        catalog
    }

    #[test]
    fn join_unknown_map_fails() {
        let catalog = Catalog::new();
        let mut manager = SessionManager::new(catalog, false, SmallRng::seed_from_u64(1));
        let err = manager.join("rex", &MapId::new("nope")).unwrap_err();
        assert!(matches!(err, Error::MapNotFound(_)));
    }

    #[test]
    fn join_empty_name_fails() {
        let catalog = single_road_catalog();
        let mut manager = SessionManager::new(catalog, false, SmallRng::seed_from_u64(1));
        let err = manager.join("", &MapId::new("m1")).unwrap_err();
        assert!(matches!(err, Error::InvalidName));
    }

    struct NullLeaderboard;

    #[async_trait::async_trait]
    impl RetirementSink for NullLeaderboard {
        async fn ensure_schema(&self) -> Result<(), Error> {
            Ok(())
        }
        async fn add(&self, _record: RetiredRecord) -> Result<(), Error> {
            Ok(())
        }
        async fn get(&self, _offset: usize, _limit: usize) -> Result<Vec<RetiredRecord>, Error> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn pickup_then_deliver_in_one_tick() {
        let catalog = catalog_with_office();
        let mut manager = SessionManager::new(catalog, false, SmallRng::seed_from_u64(1));
        let (token, _dog_id) = manager.join("rex", &MapId::new("m1")).unwrap();
        {
            let session = manager.ensure_session(&MapId::new("m1")).unwrap();
            session.spawn_loot(0, RealPoint::new(3.0, 0.0));
        }
        manager.set_move(&token, "R").unwrap();
        manager.tick(10_000, &NullLeaderboard).await.unwrap();
        let player = manager.find_player(&token).unwrap().clone();
        let session = manager.session(&MapId::new("m1")).unwrap();
        let dog = session.dog(player.dog_id).unwrap();
        assert!(dog.bag().is_empty());
        assert_eq!(dog.score(), 10);
        assert!(session.lost_objects().is_empty());
    }

    #[tokio::test]
    async fn afk_retirement_records_and_removes_dog() {
        let catalog = single_road_catalog();
        let mut manager = SessionManager::new(catalog, false, SmallRng::seed_from_u64(1));
        manager.set_retirement_time_ms(500);
        let (token, dog_id) = manager.join("rex", &MapId::new("m1")).unwrap();
        manager.tick(1_000, &NullLeaderboard).await.unwrap();
        assert!(manager.find_player(&token).is_none());
        assert!(manager.session(&MapId::new("m1")).unwrap().dog(dog_id).is_none());
    }
}
