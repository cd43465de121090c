//! Postgres-backed implementation of the retirement leaderboard sink.

use packfinder_core::Error;
use packfinder_database::Schema;
use packfinder_world::manager::RetiredRecord;
use packfinder_world::manager::RetirementSink;
use std::sync::Arc;
use tokio_postgres::Client;

#[rustfmt::skip]
pub const RETIRED_PLAYERS: &str = "retired_players";

/// A row in the retirement leaderboard: the player's name, final score,
/// and total play time, as it will be returned (ranked) to clients.
pub struct RetiredPlayers;

impl Schema for RetiredPlayers {
    fn name() -> &'static str {
        RETIRED_PLAYERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            RETIRED_PLAYERS,
            " (
                id        BIGSERIAL PRIMARY KEY,
                name      TEXT NOT NULL,
                score     BIGINT NOT NULL,
                play_time DOUBLE PRECISION NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_",
            RETIRED_PLAYERS,
            "_rank ON ",
            RETIRED_PLAYERS,
            " (score DESC, play_time ASC, name ASC);"
        )
    }
}

/// Leaderboard sink backed by a single Postgres table.
pub struct PostgresLeaderboard {
    client: Arc<Client>,
}

impl PostgresLeaderboard {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RetirementSink for PostgresLeaderboard {
    async fn ensure_schema(&self) -> Result<(), Error> {
        self.client
            .batch_execute(RetiredPlayers::creates())
            .await
            .map_err(|e| Error::InternalError(e.to_string()))?;
        self.client
            .batch_execute(RetiredPlayers::indices())
            .await
            .map_err(|e| Error::InternalError(e.to_string()))?;
        Ok(())
    }

    async fn add(&self, record: RetiredRecord) -> Result<(), Error> {
        self.client
            .execute(
                "INSERT INTO retired_players (name, score, play_time) VALUES ($1, $2, $3)",
                &[&record.name, &(record.score as i64), &record.play_time_seconds],
            )
            .await
            .map_err(|e| Error::InternalError(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, offset: usize, limit: usize) -> Result<Vec<RetiredRecord>, Error> {
        let rows = self
            .client
            .query(
                "SELECT name, score, play_time FROM retired_players \
                 ORDER BY score DESC, play_time ASC, name ASC \
                 OFFSET $1 LIMIT $2",
                &[&(offset as i64), &(limit as i64)],
            )
            .await
            .map_err(|e| Error::InternalError(e.to_string()))?;
        Ok(rows
            .iter()
            .map(|row| RetiredRecord {
                name: row.get("name"),
                score: row.get::<_, i64>("score") as u64,
                play_time_seconds: row.get("play_time"),
            })
            .collect())
    }
}
