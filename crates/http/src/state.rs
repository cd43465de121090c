//! Shared application state behind `web::Data`.
//!
//! The core runs under a single serial execution domain (see the
//! concurrency model this crate's manager is built against): every
//! state-mutating request locks the same mutex, so operations never
//! interleave even though actix itself is multi-threaded.

use packfinder_world::manager::DefaultRng;
use packfinder_world::manager::RetirementSink;
use packfinder_world::manager::SessionManager;
use packfinder_world::snapshot::SnapshotListener;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Core {
    pub manager: SessionManager<DefaultRng>,
    pub listener: SnapshotListener,
}

pub struct AppState {
    pub core: Mutex<Core>,
    pub leaderboard: Arc<dyn RetirementSink>,
    /// Set when the process was started without `--tick-period`: manual
    /// `/game/tick` requests are accepted only in that mode.
    pub manual_tick_allowed: bool,
    pub www_root: PathBuf,
}
