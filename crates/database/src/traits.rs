//! PostgreSQL schema description.

/// Table metadata and DDL generation, scoped to what a bootstrap step
/// needs: create the table and its indices, idempotently.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}
