//! Shared identifiers, error types, and runtime utilities.
//!
//! This crate provides the foundational types used throughout the
//! packfinder workspace: opaque entity identifiers, the core `Error`
//! enum surfaced by the simulation, and (behind the `server` feature)
//! logging and graceful-shutdown helpers for the long-running binary.
#![allow(dead_code)]

mod error;
mod ids;

pub use error::Error;
pub use ids::DogId;
pub use ids::MapId;
pub use ids::OfficeId;
pub use ids::Token;

/// Associates a domain entity with its identifier.
pub trait Unique<T = Self> {
    fn id(&self) -> T;
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register SIGINT/SIGTERM handling that flips the shared interrupt flag.
/// Unlike a hard `process::exit`, callers are expected to observe
/// [`interrupted`] and unwind (drain the strand, snapshot, then exit).
#[cfg(feature = "server")]
pub fn catch_shutdown() {
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        log::info!("shutdown requested, draining before exit");
        INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
    });
}

#[cfg(feature = "server")]
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check whether graceful shutdown was requested.
#[cfg(feature = "server")]
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
}
#[cfg(not(feature = "server"))]
pub fn interrupted() -> bool {
    false
}
