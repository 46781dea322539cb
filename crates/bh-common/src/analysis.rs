//! Analysis output types: suspicious joins and user profiles.
//!
//! Serialized names reproduce the report payload contract exactly. The
//! mixed naming convention on [`SuspiciousJoin`] (camelCase session fields
//! next to snake_case event fields) is intentional: it is the wire format
//! the report renderer consumes.

use crate::session::SessionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A detected suspicious join: one player starting a session within the
/// threshold window after another player's start on the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousJoin {
    /// Table the join happened on.
    #[serde(rename = "tableId")]
    pub table_id: String,

    /// Display name of the table.
    #[serde(rename = "tableName")]
    pub table_name: String,

    /// Username of the later session.
    pub joiner: String,

    /// Start timestamp of the joiner's session.
    pub join_time: DateTime<Utc>,

    /// Username of the immediately prior session on the table.
    pub preceding_player: String,

    /// Seconds between the two start times; non-negative, at most the
    /// configured threshold.
    pub time_gap_sec: f64,

    /// Joiner's small blind, for display.
    #[serde(rename = "smallBlind")]
    pub small_blind: f64,

    /// Joiner's big blind, for display.
    #[serde(rename = "bigBlind")]
    pub big_blind: f64,

    /// Joiner's game variant, for display.
    #[serde(rename = "gameType")]
    pub game_type: String,

    /// Joiner's limit structure, for display.
    #[serde(rename = "limitType")]
    pub limit_type: String,
}

/// One target relationship of a hunter: who they joined after, how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCount {
    /// Username of the preceding player.
    pub target: String,
    /// Number of suspicious joins after this target.
    pub count: u64,
}

/// One hunter relationship of a target: who joined after them, how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterCount {
    /// Username of the joiner.
    pub hunter: String,
    /// Number of suspicious joins by this hunter.
    pub count: u64,
}

/// Per-user hunter view: who this user tends to join right after.
///
/// One profile exists for every username in the session table, including
/// users with no suspicious activity (all counters zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterProfile {
    /// Username this profile describes.
    pub username: String,

    /// Total suspicious joins made by this user.
    pub join_after_count: u64,

    /// join_after_count / total_sessions, as a rounded percentage.
    pub join_after_percentage: u32,

    /// Per-target join counts, ordered by target username.
    pub targets: Vec<TargetCount>,

    /// Target with the highest count; ties resolve to the
    /// lexicographically smallest username.
    pub most_common_target: Option<String>,

    /// Count for the most common target.
    pub most_common_target_count: u64,

    /// most_common_target_count / join_after_count, as a rounded
    /// percentage: how concentrated the hunting is on one victim.
    pub target_consistency: u32,

    /// All sessions by this user, suspicious or not.
    pub total_sessions: u64,

    /// Composite suspicion score in [0, 100].
    pub score: u32,
}

/// Per-user target view: who tends to join right after this user.
///
/// The mirror of [`HunterProfile`]; targets are victims, so there is no
/// suspicion score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Username this profile describes.
    pub username: String,

    /// Times someone suspiciously joined after this user.
    pub joined_after_count: u64,

    /// joined_after_count / total_sessions, as a rounded percentage.
    pub joined_after_percentage: u32,

    /// Per-hunter join counts, ordered by hunter username.
    pub hunters: Vec<HunterCount>,

    /// Hunter with the highest count; ties resolve to the
    /// lexicographically smallest username.
    pub most_common_hunter: Option<String>,

    /// Count for the most common hunter.
    pub most_common_hunter_count: u64,

    /// most_common_hunter_count / joined_after_count, as a rounded
    /// percentage.
    pub hunter_consistency: u32,

    /// All sessions by this user, suspicious or not.
    pub total_sessions: u64,
}

/// The full data contract handed to the report layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDataset {
    /// Detected suspicious joins, grouped by table then time.
    #[serde(rename = "suspiciousJoins")]
    pub suspicious_joins: Vec<SuspiciousJoin>,

    /// Hunter profiles, sorted by score descending then username.
    #[serde(rename = "bumphunterProfiles")]
    pub bumphunter_profiles: Vec<HunterProfile>,

    /// Target profiles, sorted by joined_after_count descending then
    /// username.
    #[serde(rename = "targetProfiles")]
    pub target_profiles: Vec<TargetProfile>,

    /// Passthrough of the normalized session table.
    #[serde(rename = "originalData")]
    pub original_data: Vec<SessionRecord>,
}

impl AnalysisDataset {
    /// Number of distinct users with at least one suspicious join.
    pub fn active_hunter_count(&self) -> usize {
        self.bumphunter_profiles
            .iter()
            .filter(|p| p.join_after_count > 0)
            .count()
    }

    /// Highest hunter score in the dataset, 0 when empty.
    pub fn max_score(&self) -> u32 {
        self.bumphunter_profiles
            .iter()
            .map(|p| p.score)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_suspicious_join_wire_names() {
        let join = SuspiciousJoin {
            table_id: "T1".to_string(),
            table_name: "Table T1".to_string(),
            joiner: "bob".to_string(),
            join_time: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 8).unwrap(),
            preceding_player: "alice".to_string(),
            time_gap_sec: 8.0,
            small_blind: 0.5,
            big_blind: 1.0,
            game_type: "NLHE".to_string(),
            limit_type: "No Limit".to_string(),
        };
        let json = serde_json::to_value(&join).unwrap();

        // Mixed convention pinned: session fields camelCase, event fields
        // snake_case.
        assert!(json.get("tableId").is_some());
        assert!(json.get("smallBlind").is_some());
        assert!(json.get("join_time").is_some());
        assert!(json.get("preceding_player").is_some());
        assert!(json.get("time_gap_sec").is_some());
    }

    #[test]
    fn test_dataset_wire_names() {
        let dataset = AnalysisDataset {
            suspicious_joins: vec![],
            bumphunter_profiles: vec![],
            target_profiles: vec![],
            original_data: vec![],
        };
        let json = serde_json::to_value(&dataset).unwrap();
        assert!(json.get("suspiciousJoins").is_some());
        assert!(json.get("bumphunterProfiles").is_some());
        assert!(json.get("targetProfiles").is_some());
        assert!(json.get("originalData").is_some());
    }

    #[test]
    fn test_active_hunter_count_ignores_zero_profiles() {
        let quiet = HunterProfile {
            username: "alice".to_string(),
            join_after_count: 0,
            join_after_percentage: 0,
            targets: vec![],
            most_common_target: None,
            most_common_target_count: 0,
            target_consistency: 0,
            total_sessions: 3,
            score: 0,
        };
        let mut active = quiet.clone();
        active.username = "bob".to_string();
        active.join_after_count = 2;
        active.score = 23;

        let dataset = AnalysisDataset {
            suspicious_joins: vec![],
            bumphunter_profiles: vec![active, quiet],
            target_profiles: vec![],
            original_data: vec![],
        };
        assert_eq!(dataset.active_hunter_count(), 1);
        assert_eq!(dataset.max_score(), 23);
    }
}
