//! Dog: a single player-controlled agent within a session.

use crate::geometry::RealPoint;
use packfinder_core::DogId;

/// Facing/movement direction. `None` means stopped (no command issued yet,
/// or the last command was the empty stop command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
    None,
}

impl Direction {
    /// Parses a move command from the HTTP API's `{"" | "U" | "D" | "L" |
    /// "R"}` vocabulary. Callers must reject anything outside that
    /// vocabulary as `InvalidAction` before reaching here — see
    /// `SessionManager::set_move`, the sole caller.
    pub fn from_command(command: &str) -> Self {
        match command {
            "U" => Direction::North,
            "D" => Direction::South,
            "L" => Direction::West,
            "R" => Direction::East,
            _ => Direction::None,
        }
    }

    /// Inverse of [`from_command`], used to encode the current facing in
    /// the `/game/state` response. `None` encodes as the empty string,
    /// symmetric with the stop command that produces it.
    pub fn to_command(self) -> &'static str {
        match self {
            Direction::North => "U",
            Direction::South => "D",
            Direction::West => "L",
            Direction::East => "R",
            Direction::None => "",
        }
    }

    fn velocity(self, speed: f64) -> (f64, f64) {
        match self {
            Direction::North => (0.0, -speed),
            Direction::South => (0.0, speed),
            Direction::West => (-speed, 0.0),
            Direction::East => (speed, 0.0),
            Direction::None => (0.0, 0.0),
        }
    }
}

/// An item currently held in a dog's bag, pending delivery to an office.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct BagItem {
    pub id: usize,
    pub loot_type: i64,
}

#[derive(Debug, Clone)]
pub struct Dog {
    id: DogId,
    name: String,
    position: RealPoint,
    speed: (f64, f64),
    direction: Direction,
    bag: Vec<BagItem>,
    score: u64,
    play_time_ms: u64,
    afk_time_ms: u64,
}

impl Dog {
    pub fn new(id: DogId, name: impl Into<String>, position: RealPoint) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            speed: (0.0, 0.0),
            direction: Direction::None,
            bag: Vec::new(),
            score: 0,
            play_time_ms: 0,
            afk_time_ms: 0,
        }
    }

    pub fn id(&self) -> DogId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn position(&self) -> RealPoint {
        self.position
    }
    pub fn speed(&self) -> (f64, f64) {
        self.speed
    }
    pub fn direction(&self) -> Direction {
        self.direction
    }
    pub fn bag(&self) -> &[BagItem] {
        &self.bag
    }
    pub fn score(&self) -> u64 {
        self.score
    }
    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }
    pub fn afk_time_ms(&self) -> u64 {
        self.afk_time_ms
    }

    pub fn set_position(&mut self, position: RealPoint) {
        self.position = position;
    }

    /// Stops the dog without touching its facing direction (used when
    /// motion is clamped at a road boundary).
    pub fn stop(&mut self) {
        self.speed = (0.0, 0.0);
    }

    /// Applies a move command: sets facing and speed together (empty/
    /// unrecognized commands stop the dog and clear its facing).
    pub fn set_move(&mut self, command: &str, map_speed: f64) {
        self.direction = Direction::from_command(command);
        self.speed = self.direction.velocity(map_speed);
    }

    pub fn add_to_bag(&mut self, item: BagItem) -> bool {
        self.bag.push(item);
        true
    }

    pub fn bag_is_full(&self, capacity: usize) -> bool {
        self.bag.len() >= capacity
    }

    /// Empties the bag, returning the released items.
    pub fn release_bag(&mut self) -> Vec<BagItem> {
        std::mem::take(&mut self.bag)
    }

    pub fn add_score(&mut self, amount: i64) {
        self.score = self.score.saturating_add_signed(amount);
    }

    pub fn add_play_time(&mut self, dt_ms: u64) {
        self.play_time_ms += dt_ms;
    }

    pub fn add_afk_time(&mut self, dt_ms: u64) {
        self.afk_time_ms += dt_ms;
    }

    pub fn reset_afk_time(&mut self) {
        self.afk_time_ms = 0;
    }

    pub fn is_stationary(&self) -> bool {
        self.speed == (0.0, 0.0)
    }

    /// Reconstructs a dog from its persisted fields, used only by
    /// snapshot restore.
    #[allow(clippy::too_many_arguments)]
    pub fn from_snapshot(
        id: DogId,
        name: String,
        position: RealPoint,
        speed: (f64, f64),
        direction: Direction,
        bag: Vec<BagItem>,
        score: u64,
        play_time_ms: u64,
        afk_time_ms: u64,
    ) -> Self {
        Self {
            id,
            name,
            position,
            speed,
            direction,
            bag,
            score,
            play_time_ms,
            afk_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_roundtrips_through_command() {
        for d in [Direction::North, Direction::South, Direction::West, Direction::East] {
            let cmd = d.to_command();
            assert_eq!(Direction::from_command(cmd), d);
        }
    }

    #[test]
    fn set_move_updates_speed_along_axis() {
        let mut dog = Dog::new(DogId::new(0), "rex", RealPoint::ZERO);
        dog.set_move("R", 2.0);
        assert_eq!(dog.speed(), (2.0, 0.0));
        dog.set_move("", 2.0);
        assert_eq!(dog.speed(), (0.0, 0.0));
        assert_eq!(dog.direction(), Direction::None);
    }
}
