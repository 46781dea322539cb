//! The normalized session table record.
//!
//! One record per observed play session. Field names in the serialized
//! form follow the camelCase headers of the source log export; columns the
//! loader does not recognize are preserved verbatim in `extra` so the
//! report can display whatever the export carried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observed play session on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque table identifier, string-comparable.
    #[serde(rename = "tableId")]
    pub table_id: String,

    /// Display label for the table; absent in some exports.
    #[serde(rename = "tableName", default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Player username.
    pub username: String,

    /// Session start; None when the source value was unparseable.
    ///
    /// Records with a null start are excluded from temporal comparison
    /// but still count toward the user's total_sessions.
    #[serde(rename = "startSession", default)]
    pub start_session: Option<DateTime<Utc>>,

    /// Session end; may be null.
    #[serde(rename = "endSession", default)]
    pub end_session: Option<DateTime<Utc>>,

    /// Game variant label (e.g. "NLHE").
    #[serde(rename = "gameType", default)]
    pub game_type: String,

    /// Limit structure label (e.g. "No Limit").
    #[serde(rename = "limitType", default)]
    pub limit_type: String,

    /// Small blind size; 0 when absent.
    #[serde(rename = "smallBlind", default)]
    pub small_blind: f64,

    /// Big blind size; 0 when absent.
    #[serde(rename = "bigBlind", default)]
    pub big_blind: f64,

    /// Passthrough attributes from columns the loader does not model.
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, String>,
}

impl SessionRecord {
    /// Display name for the table, defaulting to `Table {tableId}`.
    pub fn display_table_name(&self) -> String {
        match &self.table_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Table {}", self.table_id),
        }
    }
}
