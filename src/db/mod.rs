use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

pub mod memory;
pub mod models;
pub mod store;

pub use memory::MemoryStore;
pub use store::MatchStore;

use crate::error::StoreError;
use models::Match;

/// Thread-safe SQLite connection pool (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path.
    /// `":memory:"` opens a throwaway database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<(), StoreError> {
        self.lock()?.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl MatchStore for Database {
    async fn insert(&self, m: &Match) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO matches (
                id, home_team, away_team, home_score, away_score,
                started_at, finished_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7)",
            params![
                m.id.to_string(),
                m.home_team,
                m.away_team,
                m.home_score,
                m.away_score,
                m.started_at,
                m.finished_at,
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref f, _)
                if f.code == ErrorCode::ConstraintViolation
                    && f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::Duplicate(m.id)
            }
            other => StoreError::Sqlite(other),
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT id, home_team, away_team, home_score, away_score,
                        started_at, finished_at
                 FROM matches WHERE id = ?1",
                params![id.to_string()],
                map_match,
            )
            .optional()?;
        Ok(found)
    }

    async fn update(&self, m: &Match) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE matches SET home_team=?1, away_team=?2, home_score=?3,
                    away_score=?4, started_at=?5, finished_at=?6
             WHERE id=?7",
            params![
                m.home_team,
                m.away_team,
                m.home_score,
                m.away_score,
                m.started_at,
                m.finished_at,
                m.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::Missing(m.id));
        }
        Ok(())
    }

    async fn list_in_progress(&self) -> Result<Vec<Match>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, home_team, away_team, home_score, away_score,
                    started_at, finished_at
             FROM matches WHERE finished_at IS NULL",
        )?;
        let matches = stmt
            .query_map([], map_match)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(matches)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn map_match(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Match {
        id,
        home_team: row.get(1)?,
        away_team: row.get(2)?,
        home_score: row.get(3)?,
        away_score: row.get(4)?,
        started_at: row.get(5)?,
        finished_at: row.get(6)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS matches (
    id          TEXT    PRIMARY KEY,
    home_team   TEXT    NOT NULL,
    away_team   TEXT    NOT NULL,
    home_score  INTEGER NOT NULL DEFAULT 0 CHECK (home_score >= 0),
    away_score  INTEGER NOT NULL DEFAULT 0 CHECK (away_score >= 0),
    started_at  TEXT    NOT NULL,
    finished_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_matches_finished ON matches(finished_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn open_temp() -> Database {
        Database::open(":memory:").unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let db = open_temp();
        let m = Match::new("Netherlands".into(), "Senegal".into(), Utc::now());
        db.insert(&m).await.unwrap();

        let stored = db.find_by_id(m.id).await.unwrap().unwrap();
        assert_eq!(stored.id, m.id);
        assert_eq!(stored.home_team, "Netherlands");
        assert_eq!(stored.away_team, "Senegal");
        assert_eq!((stored.home_score, stored.away_score), (0, 0));
        assert!(stored.finished_at.is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_none() {
        let db = open_temp();
        assert!(db.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_maps_to_duplicate() {
        let db = open_temp();
        let m = Match::new("Wales".into(), "Iran".into(), Utc::now());
        db.insert(&m).await.unwrap();
        let err = db.insert(&m).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == m.id));
    }

    #[tokio::test]
    async fn test_check_violation_is_not_duplicate() {
        let db = open_temp();
        let mut m = Match::new("Poland".into(), "Mexico".into(), Utc::now());
        m.home_score = -1;
        let err = db.insert(&m).await.unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)), "got {err:?}");
        assert!(db.find_by_id(m.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_persists_scores_and_finish() {
        let db = open_temp();
        let mut m = Match::new("England".into(), "USA".into(), Utc::now());
        db.insert(&m).await.unwrap();

        m.home_score = 3;
        m.away_score = 1;
        m.finished_at = Some(Utc::now());
        db.update(&m).await.unwrap();

        let stored = db.find_by_id(m.id).await.unwrap().unwrap();
        assert_eq!((stored.home_score, stored.away_score), (3, 1));
        assert!(stored.finished_at.is_some());
        assert!(db.list_in_progress().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_is_missing() {
        let db = open_temp();
        let m = Match::new("Qatar".into(), "Ecuador".into(), Utc::now());
        let err = db.update(&m).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(id) if id == m.id));
    }

    #[tokio::test]
    async fn test_list_in_progress_only_open_matches() {
        let db = open_temp();
        let live = Match::new("Japan".into(), "Costa Rica".into(), Utc::now());
        let mut done = Match::new("Belgium".into(), "Morocco".into(), Utc::now());
        db.insert(&live).await.unwrap();
        db.insert(&done).await.unwrap();
        done.finished_at = Some(Utc::now());
        db.update(&done).await.unwrap();

        let ids: Vec<Uuid> = db
            .list_in_progress()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![live.id]);
    }
}
