//! SQLite-backed analysis store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use lexiscope_core::{AnalysisRecord, Error, Result, Sentiment};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::schema::SCHEMA_SQL;
use crate::AnalysisStore;

const COLUMNS: &str = "id, text, summary, title, topics_json, sentiment, keywords_json, \
    confidence_score, entities_json, phrases_json, readability_score, word_count, \
    sentence_count, created_at";

/// Analysis records in a single SQLite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the database at `db_path` (e.g. `data/lexiscope.db`).
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        info!(
            "SqliteStore initialized: {} analyses, path={}",
            store.count()?,
            store.db_path.display()
        );
        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Insert a record. Fails with `Storage` if the id already exists.
    pub fn insert_record(&self, record: &AnalysisRecord) -> Result<()> {
        let conn = self.conn.lock();
        conn.prepare_cached(&format!(
            "INSERT INTO analyses ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            COLUMNS
        ))
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            record.id,
            record.text,
            record.summary,
            record.title,
            to_json(&record.topics)?,
            record.sentiment.as_str(),
            to_json(&record.keywords)?,
            record.confidence_score,
            record.entities.as_ref().map(to_json).transpose()?,
            record.phrases.as_ref().map(to_json).transpose()?,
            record.readability_score,
            record.word_count.map(|n| n as i64),
            record.sentence_count.map(|n| n as i64),
            format_timestamp(&record.created_at),
        ])
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint") {
                Error::Storage(format!("Analysis {} already exists", record.id))
            } else {
                Error::Database(e.to_string())
            }
        })?;
        debug!("Stored analysis {}", record.id);
        Ok(())
    }

    pub fn get_record(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(&format!("SELECT {} FROM analyses WHERE id = ?1", COLUMNS))
            .map_err(|e| Error::Database(e.to_string()))?;
        let record = stmt
            .query_row(params![id], Self::row_to_record)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(record)
    }

    /// All records ordered by creation time.
    pub fn all_records(&self, ascending: bool) -> Result<Vec<AnalysisRecord>> {
        let order = if ascending { "ASC" } else { "DESC" };
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM analyses ORDER BY created_at {}, rowid {}",
            COLUMNS, order, order
        );
        let mut stmt = conn.prepare_cached(&sql).map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            match row {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable analysis row: {}", e),
            }
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
        let sentiment: String = row.get("sentiment")?;
        let created_at: String = row.get("created_at")?;
        Ok(AnalysisRecord {
            id: row.get("id")?,
            text: row.get("text")?,
            summary: row.get("summary")?,
            title: row.get("title")?,
            topics: from_json_column(row, "topics_json")?.unwrap_or_default(),
            sentiment: Sentiment::normalize(&sentiment),
            keywords: from_json_column(row, "keywords_json")?.unwrap_or_default(),
            confidence_score: row.get("confidence_score")?,
            entities: from_json_column(row, "entities_json")?,
            phrases: from_json_column(row, "phrases_json")?,
            readability_score: row.get("readability_score")?,
            word_count: row.get::<_, Option<i64>>("word_count")?.map(|n| n.max(0) as usize),
            sentence_count: row.get::<_, Option<i64>>("sentence_count")?.map(|n| n.max(0) as usize),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

impl AnalysisStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn is_available(&self) -> bool {
        self.conn
            .lock()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        self.insert_record(record)
    }

    fn get(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        self.get_record(id)
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>> {
        self.all_records(false)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn from_json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    column: &str,
) -> rusqlite::Result<Option<T>> {
    let Some(raw) = row.get::<_, Option<String>>(column)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lexiscope_core::EntityGroups;
    use tempfile::TempDir;

    fn test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("lexiscope.db")).unwrap();
        (store, dir)
    }

    fn record(id: &str, minutes: i64) -> AnalysisRecord {
        AnalysisRecord {
            id: id.into(),
            text: format!("text {}", id),
            summary: "A summary.".into(),
            title: Some("Title".into()),
            topics: vec!["Health".into(), "diet".into()],
            sentiment: Sentiment::Positive,
            keywords: vec!["vegetable".into()],
            confidence_score: 0.75,
            entities: None,
            phrases: None,
            readability_score: None,
            word_count: None,
            sentence_count: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let (store, _dir) = test_store();
        let mut r = record("a", 0);
        r.entities = Some(EntityGroups {
            people: vec!["Ada Lovelace".into()],
            other: vec!["1843 (DATE)".into()],
            ..EntityGroups::default()
        });
        r.phrases = Some(vec!["analytical engine".into()]);
        r.readability_score = Some(42.5);
        r.word_count = Some(12);
        r.sentence_count = Some(2);
        store.insert(&r).unwrap();

        let loaded = store.get("a").unwrap().unwrap();
        assert_eq!(loaded, r);
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_get_record_reuses_cached_statement() {
        let (store, _dir) = test_store();
        store.insert(&record("x", 0)).unwrap();
        for _ in 0..3 {
            assert_eq!(store.get_record("x").unwrap().map(|r| r.id), Some("x".to_string()));
            assert!(store.get_record("y").unwrap().is_none());
        }
    }

    #[test]
    fn test_absent_optionals_stay_absent() {
        let (store, _dir) = test_store();
        store.insert(&record("b", 0)).unwrap();
        let loaded = store.get("b").unwrap().unwrap();
        assert!(loaded.entities.is_none());
        assert!(loaded.phrases.is_none());
        assert!(loaded.word_count.is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (store, _dir) = test_store();
        store.insert(&record("dup", 0)).unwrap();
        let err = store.insert(&record("dup", 1)).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_list_newest_first() {
        let (store, _dir) = test_store();
        store.insert(&record("old", 0)).unwrap();
        store.insert(&record("new", 10)).unwrap();
        store.insert(&record("mid", 5)).unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let ascending: Vec<String> =
            store.all_records(true).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ascending, vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("lexiscope.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(&record("kept", 0)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.is_available());
        assert_eq!(store.name(), "sqlite");
    }
}
