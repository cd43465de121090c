//! Snapshot Listener: periodic persistence of the manager's full state to
//! a file via write-then-rename, with reverse restoration on startup.

use crate::dog::BagItem;
use crate::dog::Dog;
use crate::dog::Direction;
use crate::geometry::RealPoint;
use crate::manager::Player;
use crate::manager::SessionManager;
use crate::session::LostObject;
use packfinder_core::DogId;
use packfinder_core::Error;
use packfinder_core::MapId;
use packfinder_core::Token;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct DogSnapshot {
    id: u64,
    direction: Direction,
    pos_x: f64,
    pos_y: f64,
    speed_x: f64,
    speed_y: f64,
    name: String,
    score: u64,
    bag: Vec<BagItem>,
    play_time_ms: u64,
    afk_time_ms: u64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct LostObjectSnapshot {
    r#type: i64,
    x: f64,
    y: f64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SessionSnapshot {
    map_id: String,
    dogs: Vec<DogSnapshot>,
    lost_objects: Vec<LostObjectSnapshot>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct PlayerSnapshot {
    token: String,
    dog_id: u64,
    map_id: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Default)]
struct SnapshotData {
    sessions: Vec<SessionSnapshot>,
    players: Vec<PlayerSnapshot>,
}

/// Periodic saver: accumulates elapsed tick time and writes the manager's
/// full state to `path` once `save_period_ms` has elapsed, via a sibling
/// `.tmp` file plus atomic rename so a reader never observes a torn write.
pub struct SnapshotListener {
    path: Option<PathBuf>,
    save_period_ms: u64,
    accumulator_ms: u64,
}

impl SnapshotListener {
    pub fn new(path: Option<PathBuf>, save_period_ms: u64) -> Self {
        Self {
            path,
            save_period_ms,
            accumulator_ms: 0,
        }
    }

    pub fn save<R: rand::RngCore>(&self, manager: &SessionManager<R>) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = snapshot_from_manager(manager);
        let json = serde_json::to_vec_pretty(&data)
            .map_err(|e| Error::InternalError(e.to_string()))?;
        let tmp_path = tmp_path_for(path);
        std::fs::write(&tmp_path, json).map_err(|e| Error::InternalError(e.to_string()))?;
        std::fs::rename(&tmp_path, path).map_err(|e| Error::InternalError(e.to_string()))?;
        Ok(())
    }

    /// Loads persisted state into `manager`, if a state file was
    /// configured and exists. A no-op if the path is unset or the file is
    /// absent. Fails with `RestoreError` if the data references a dog that
    /// does not end up installed.
    pub fn load<R: rand::RngCore>(&self, manager: &mut SessionManager<R>) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }
        let bytes = std::fs::read(path).map_err(|e| Error::RestoreError(e.to_string()))?;
        let data: SnapshotData =
            serde_json::from_slice(&bytes).map_err(|e| Error::RestoreError(e.to_string()))?;
        restore_into_manager(manager, data)
    }

    /// Accumulates `dt_ms` and saves once the configured period has
    /// elapsed. Called once per tick, after all per-session processing
    /// finishes, per the manager's ordering guarantee.
    pub fn on_tick<R: rand::RngCore>(&mut self, dt_ms: u64, manager: &SessionManager<R>) {
        if self.save_period_ms == 0 {
            return;
        }
        self.accumulator_ms += dt_ms;
        if self.accumulator_ms >= self.save_period_ms {
            if let Err(err) = self.save(manager) {
                log::error!("snapshot save failed: {err}");
            }
            self.accumulator_ms = 0;
        }
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn snapshot_from_manager<R: rand::RngCore>(manager: &SessionManager<R>) -> SnapshotData {
    let sessions = manager
        .sessions()
        .map(|session| SessionSnapshot {
            map_id: session.map_id().to_string(),
            dogs: session
                .dogs()
                .map(|dog| DogSnapshot {
                    id: dog.id().value(),
                    direction: dog.direction(),
                    pos_x: dog.position().x,
                    pos_y: dog.position().y,
                    speed_x: dog.speed().0,
                    speed_y: dog.speed().1,
                    name: dog.name().to_owned(),
                    score: dog.score(),
                    bag: dog.bag().to_vec(),
                    play_time_ms: dog.play_time_ms(),
                    afk_time_ms: dog.afk_time_ms(),
                })
                .collect(),
            lost_objects: session
                .lost_objects()
                .iter()
                .map(|o| LostObjectSnapshot {
                    r#type: o.loot_type,
                    x: o.position.x,
                    y: o.position.y,
                })
                .collect(),
        })
        .collect();
    let players = manager
        .players()
        .map(|p| PlayerSnapshot {
            token: p.token.to_string(),
            dog_id: p.dog_id.value(),
            map_id: p.map_id.to_string(),
        })
        .collect();
    SnapshotData { sessions, players }
}

fn restore_into_manager<R: rand::RngCore>(
    manager: &mut SessionManager<R>,
    data: SnapshotData,
) -> Result<(), Error> {
    for session_data in data.sessions {
        let map_id = MapId::new(session_data.map_id);
        let session = manager
            .ensure_session(&map_id)
            .ok_or_else(|| Error::RestoreError(format!("unknown map in snapshot: {map_id}")))?;
        for dog_data in session_data.dogs {
            let dog = Dog::from_snapshot(
                DogId::new(dog_data.id),
                dog_data.name,
                RealPoint::new(dog_data.pos_x, dog_data.pos_y),
                (dog_data.speed_x, dog_data.speed_y),
                dog_data.direction,
                dog_data.bag,
                dog_data.score,
                dog_data.play_time_ms,
                dog_data.afk_time_ms,
            );
            session.install_dog(dog);
        }
        for object in session_data.lost_objects {
            session.install_lost_object(LostObject::new(
                object.r#type,
                RealPoint::new(object.x, object.y),
            ));
        }
    }

    for player_data in data.players {
        let map_id = MapId::new(player_data.map_id);
        let dog_id = DogId::new(player_data.dog_id);
        let session = manager
            .session(&map_id)
            .ok_or_else(|| Error::RestoreError(format!("unknown map for player: {map_id}")))?;
        if session.dog(dog_id).is_none() {
            return Err(Error::RestoreError(format!(
                "player references missing dog {dog_id} in map {map_id}"
            )));
        }
        let token: Token = player_data
            .token
            .parse()
            .map_err(|_| Error::RestoreError("malformed token in snapshot".into()))?;
        manager.install_player(Player { token, map_id, dog_id });
    }
    Ok(())
}
