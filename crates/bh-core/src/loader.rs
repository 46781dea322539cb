//! CSV ingest for the session table.
//!
//! Reads a headered CSV export and produces normalized
//! [`SessionRecord`]s. The loader is deliberately forgiving: optional
//! fields default, unknown columns are preserved verbatim in the
//! passthrough map, and a malformed timestamp nulls out only that value.
//! A whole record is never dropped for one bad field; a whole table is
//! never dropped for one bad record.

use bh_common::{Error, Result, SessionRecord};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::timestamp::parse_timestamp;

/// Header names the loader maps onto the fixed record fields.
const KNOWN_COLUMNS: &[&str] = &[
    "tableId",
    "tableName",
    "username",
    "startSession",
    "endSession",
    "gameType",
    "limitType",
    "smallBlind",
    "bigBlind",
];

/// Columns that must be present in the header for the export to be
/// analyzable at all.
const REQUIRED_COLUMNS: &[&str] = &["tableId", "username", "startSession"];

/// Load and normalize the session table from a CSV file.
pub fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Ingest(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::Ingest(format!("cannot read header row: {e}")))?
        .clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            return Err(Error::MissingColumn {
                column: (*required).to_string(),
            });
        }
    }

    let mut sessions = Vec::new();
    let mut null_starts = 0usize;
    let mut skipped = 0usize;

    for (index, result) in reader.records().enumerate() {
        // Record numbers are 1-based and skip the header row.
        let record_no = (index + 2) as u64;
        let record = match result {
            Ok(record) => record,
            // One undecodable record must not sink the whole table; skip
            // it and keep going. Structural stream errors stay fatal.
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!(record = record_no, error = %e, "skipping undecodable record");
                skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(Error::CsvRecord {
                    record: record_no,
                    message: e.to_string(),
                })
            }
        };

        // Rows shorter than the header leave trailing fields empty; the
        // per-field defaults cover that.
        let session = record_from_row(&headers, &record, record_no);
        if session.start_session.is_none() {
            null_starts += 1;
        }
        sessions.push(session);
    }

    info!(
        path = %path.display(),
        sessions = sessions.len(),
        null_starts,
        skipped,
        "Session table loaded"
    );

    Ok(sessions)
}

/// Build one normalized record from a CSV row.
fn record_from_row(
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
    record_no: u64,
) -> SessionRecord {
    let field = |name: &str| -> &str {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| record.get(i))
            .unwrap_or("")
    };

    let table_id = field("tableId").to_string();
    let username = field("username").to_string();
    if username.is_empty() {
        warn!(record = record_no, "record has an empty username");
    }

    let raw_start = field("startSession");
    let start_session = parse_timestamp(raw_start);
    if start_session.is_none() && !raw_start.is_empty() {
        warn!(
            record = record_no,
            value = raw_start,
            "unparseable startSession; record excluded from temporal comparison"
        );
    }
    let end_session = parse_timestamp(field("endSession"));

    let table_name = match field("tableName") {
        "" => None,
        name => Some(name.to_string()),
    };

    let mut extra = BTreeMap::new();
    for (i, header) in headers.iter().enumerate() {
        if KNOWN_COLUMNS.contains(&header) {
            continue;
        }
        let value = record.get(i).unwrap_or("");
        extra.insert(header.to_string(), value.to_string());
    }

    SessionRecord {
        table_id,
        table_name,
        username,
        start_session,
        end_session,
        game_type: field("gameType").to_string(),
        limit_type: field("limitType").to_string(),
        small_blind: parse_blind(field("smallBlind"), record_no, "smallBlind"),
        big_blind: parse_blind(field("bigBlind"), record_no, "bigBlind"),
        extra,
    }
}

/// Parse a blind size, defaulting to 0 on empty or garbage values.
fn parse_blind(raw: &str, record_no: u64, column: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!(record = record_no, column, value = raw, "bad blind value, using 0");
            0.0
        }
    }
}
