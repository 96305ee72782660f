//! Database schema for the audit history store

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per completed audit
CREATE TABLE IF NOT EXISTS audits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    mode TEXT NOT NULL,
    scoring_version TEXT NOT NULL,
    overall_score REAL NOT NULL,
    robots_score REAL NOT NULL,
    llms_txt_score REAL NOT NULL,
    schema_org_score REAL NOT NULL,
    content_score REAL NOT NULL,
    agent_readiness_score REAL,
    config_hash TEXT,
    report_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audits_url ON audits(url);
CREATE INDEX IF NOT EXISTS idx_audits_created ON audits(created_at);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
