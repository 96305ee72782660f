//! SQLite-backed audit history

use super::schema::initialize_schema;
use super::{HistoryError, HistoryResult};
use crate::report::AnyReport;
use crate::scoring::ScoringVersion;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// A stored audit
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub overall_score: f64,
    pub config_hash: Option<String>,
    pub report: AnyReport,
}

type RawRow = (i64, String, String, f64, Option<String>, String);

/// Audit history database
///
/// Opened by the caller before or after an audit; the orchestrator never
/// touches it.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Opens (or creates) the history database at `path`
    pub fn open(path: &Path) -> HistoryResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> HistoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Stores a finished report, returning its row id
    pub fn save(&mut self, report: &AnyReport, config_hash: Option<&str>) -> HistoryResult<i64> {
        let view = report.view();
        let mode = match report {
            AnyReport::Single(_) => "single",
            AnyReport::Site(_) => "site",
        };
        let json = serde_json::to_string(report)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO audits (url, mode, scoring_version, overall_score, robots_score,
                llms_txt_score, schema_org_score, content_score, agent_readiness_score,
                config_hash, report_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                view.url(),
                mode,
                view.scoring_version().to_string(),
                view.overall_score(),
                view.robots().score,
                view.llms_txt().score,
                view.schema_org().score,
                view.content().score,
                view.agent_readiness().map(|ar| ar.score),
                config_hash,
                json,
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Saved audit {} for {}", id, view.url());
        Ok(id)
    }

    /// Most recent audit of `url` scored under `scoring_version`
    pub fn latest(
        &self,
        url: &str,
        scoring_version: ScoringVersion,
    ) -> HistoryResult<Option<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, created_at, overall_score, config_hash, report_json
             FROM audits WHERE url = ?1 AND scoring_version = ?2
             ORDER BY id DESC LIMIT 1",
        )?;

        let row = stmt
            .query_row(params![url, scoring_version.to_string()], read_row)
            .optional()?;
        row.map(into_entry).transpose()
    }

    /// Up to `limit` audits of `url`, newest first
    pub fn list(&self, url: &str, limit: usize) -> HistoryResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, created_at, overall_score, config_hash, report_json
             FROM audits WHERE url = ?1 ORDER BY id DESC LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![url, limit as i64], read_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(into_entry(row?)?);
        }
        Ok(entries)
    }

    /// Total number of stored audits
    pub fn count(&self) -> HistoryResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audits", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_entry(row: RawRow) -> HistoryResult<HistoryEntry> {
    let (id, url, created_at, overall_score, config_hash, json) = row;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| HistoryError::Timestamp(format!("{}: {}", created_at, e)))?
        .with_timezone(&Utc);
    Ok(HistoryEntry {
        id,
        url,
        created_at,
        overall_score,
        config_hash,
        report: serde_json::from_str(&json)?,
    })
}
