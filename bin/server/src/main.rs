//! Game world server binary.
//!
//! Wires together the map configuration loader, the session manager, the
//! snapshot listener, the Postgres-backed leaderboard, and the HTTP API
//! surface, then runs until interrupted.

use clap::Parser;
use packfinder_http::state::AppState;
use packfinder_http::state::Core;
use packfinder_world::manager::DefaultRng;
use packfinder_world::manager::RetirementSink;
use packfinder_world::manager::SessionManager;
use packfinder_world::snapshot::SnapshotListener;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Multiplayer web-game world server.
#[derive(Parser, Debug)]
#[command(author, version, about = "Game world server")]
struct Args {
    /// Automatic tick period in milliseconds. When absent, the world only
    /// advances via manual POST /api/v1/game/tick requests.
    #[arg(short = 't', long)]
    tick_period: Option<u64>,

    /// Path to the map configuration JSON file.
    #[arg(short = 'c', long)]
    config_file: PathBuf,

    /// Directory of static frontend assets to serve.
    #[arg(short = 'w', long)]
    www_root: PathBuf,

    /// Spawn joining and respawned dogs at a random point on a random
    /// road instead of the map's first road.
    #[arg(long, default_value_t = false)]
    randomize_spawn_points: bool,

    /// Path to persist/restore world state. Omit to disable persistence.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// How often to write the state file, in milliseconds. Ignored if
    /// `--state-file` is absent.
    #[arg(long, default_value_t = 0)]
    save_state_period: u64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    packfinder_core::log();

    let args = Args::parse();

    let loaded = packfinder_config::load_from_path(&args.config_file).unwrap_or_else(|err| {
        log::error!("failed to load {}: {err}", args.config_file.display());
        std::process::exit(1);
    });

    let db_client = packfinder_database::db().await;
    let leaderboard = Arc::new(packfinder_records::PostgresLeaderboard::new(db_client));
    leaderboard
        .ensure_schema()
        .await
        .unwrap_or_else(|err| {
            log::error!("failed to ensure leaderboard schema: {err}");
            std::process::exit(1);
        });

    let rng = DefaultRng::from_rng(&mut rand::rng());
    let mut manager = SessionManager::new(loaded.catalog, args.randomize_spawn_points, rng);
    manager.set_retirement_time_ms(loaded.retirement_time_ms);

    let listener = SnapshotListener::new(args.state_file, args.save_state_period);
    listener.load(&mut manager).unwrap_or_else(|err| {
        log::error!("failed to restore state file: {err}");
        std::process::exit(1);
    });

    let state = Arc::new(AppState {
        core: Mutex::new(Core { manager, listener }),
        leaderboard: leaderboard.clone(),
        manual_tick_allowed: args.tick_period.is_none(),
        www_root: args.www_root,
    });

    if let Some(period_ms) = args.tick_period {
        let ticker_state = state.clone();
        tokio::spawn(async move {
            run_ticker(ticker_state, period_ms).await;
        });
    }

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    log::info!("starting game world server on {bind_addr}");
    packfinder_core::catch_shutdown();

    let server = packfinder_http::run(state.clone(), &bind_addr, workers);
    tokio::pin!(server);
    loop {
        if packfinder_core::interrupted() {
            break;
        }
        tokio::select! {
            res = &mut server => {
                return res;
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(200)) => {}
        }
    }

    log::info!("shutting down, writing final snapshot");
    let core = state.core.lock().await;
    if let Err(err) = core.listener.save(&core.manager) {
        log::error!("final snapshot save failed: {err}");
    }
    Ok(())
}

async fn run_ticker(state: Arc<AppState>, period_ms: u64) {
    let mut interval = tokio::time::interval(std::time::Duration::from_millis(period_ms));
    interval.tick().await;
    loop {
        interval.tick().await;
        if packfinder_core::interrupted() {
            return;
        }
        let mut core = state.core.lock().await;
        if let Err(err) = core.manager.tick(period_ms, state.leaderboard.as_ref()).await {
            log::error!("tick aborted: {err}");
            continue;
        }
        core.listener.on_tick(period_ms, &core.manager);
    }
}
