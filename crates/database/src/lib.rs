//! PostgreSQL connectivity for the retirement leaderboard store.
//!
//! Scoped down from the bulk-loading machinery this crate's shape is
//! patterned on: the leaderboard is append-only and queried a page at a
//! time, so only [`Schema`]'s DDL-description half is carried over — no
//! binary `COPY` path.

mod traits;

pub use traits::Schema;

use std::sync::Arc;
use tokio_postgres::Client;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Establishes a database connection using the `GAME_DB_URL` environment
/// variable. Returns an `Arc<Client>` suitable for sharing across async
/// tasks; the connection's background driver is spawned onto the current
/// runtime.
///
/// # Panics
///
/// Panics if `GAME_DB_URL` is not set or the connection fails — a missing
/// leaderboard store at startup is a configuration error, not a
/// recoverable one.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let url = std::env::var("GAME_DB_URL").expect("GAME_DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(&url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}
