//! Database schema SQL.

/// Analyses table. List-valued fields and entity groups are stored as JSON
/// text; `created_at` is RFC 3339 UTC with microseconds, so text order is
/// time order.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    summary TEXT NOT NULL,
    title TEXT,
    topics_json TEXT NOT NULL DEFAULT '[]',
    sentiment TEXT NOT NULL,
    keywords_json TEXT NOT NULL DEFAULT '[]',
    confidence_score REAL NOT NULL,
    entities_json TEXT,
    phrases_json TEXT,
    readability_score REAL,
    word_count INTEGER,
    sentence_count INTEGER,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);
CREATE INDEX IF NOT EXISTS idx_analyses_sentiment ON analyses(sentiment);
"#;
