//! Temporal-correlation join detection.
//!
//! A suspicious join is a session start that lands within the threshold
//! window after another session's start on the same table. Only
//! immediately adjacent pairs in start-time order are compared: three
//! players seating in quick succession produce a chain of two pair
//! events, never a three-way event.

use bh_common::{SessionRecord, SuspiciousJoin};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Detect suspicious joins across the whole session table.
///
/// Sessions are partitioned by table (ascending table id), ordered by
/// start time within each partition, and walked pairwise. Records with a
/// null start time cannot participate in gap computation and are dropped
/// from the ordering; that is policy, not an error.
///
/// A zero gap (tied start times) is suspicious under the ≤ rule, and a
/// non-positive threshold therefore still flags exact-simultaneous
/// starts. Output is grouped by table, then by time; no further sort is
/// imposed here.
pub fn detect_suspicious_joins(
    sessions: &[SessionRecord],
    threshold_secs: f64,
) -> Vec<SuspiciousJoin> {
    let mut tables: BTreeMap<&str, Vec<&SessionRecord>> = BTreeMap::new();
    for session in sessions {
        if session.start_session.is_some() {
            tables.entry(&session.table_id).or_default().push(session);
        }
    }

    let mut joins = Vec::new();

    for (table_id, table_sessions) in &mut tables {
        // Stable sort: tied start times keep their input order, so the
        // earlier record in the export is treated as the predecessor.
        table_sessions.sort_by_key(|s| s.start_session);

        for pair in table_sessions.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            let (Some(prev_start), Some(join_time)) =
                (previous.start_session, current.start_session)
            else {
                continue;
            };
            let gap = gap_seconds(prev_start, join_time);

            if gap <= threshold_secs {
                joins.push(SuspiciousJoin {
                    table_id: current.table_id.clone(),
                    table_name: current.display_table_name(),
                    joiner: current.username.clone(),
                    join_time,
                    preceding_player: previous.username.clone(),
                    time_gap_sec: gap,
                    small_blind: current.small_blind,
                    big_blind: current.big_blind,
                    game_type: current.game_type.clone(),
                    limit_type: current.limit_type.clone(),
                });
            }
        }

        debug!(
            table_id = %table_id,
            sessions = table_sessions.len(),
            "table partition scanned"
        );
    }

    info!(
        tables = tables.len(),
        joins = joins.len(),
        threshold_secs,
        "Suspicious join detection complete"
    );

    joins
}

/// Start-time gap in seconds. The list is sorted ascending, so the
/// result is non-negative.
fn gap_seconds(previous: chrono::DateTime<chrono::Utc>, current: chrono::DateTime<chrono::Utc>) -> f64 {
    let delta = current - previous;
    delta
        .num_microseconds()
        .map(|us| us as f64 / 1_000_000.0)
        .unwrap_or_else(|| delta.num_milliseconds() as f64 / 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn session(table_id: &str, username: &str, start_offset_secs: Option<i64>) -> SessionRecord {
        SessionRecord {
            table_id: table_id.to_string(),
            table_name: None,
            username: username.to_string(),
            start_session: start_offset_secs
                .map(|s| Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + chrono::Duration::seconds(s)),
            end_session: None,
            game_type: "NLHE".to_string(),
            limit_type: "No Limit".to_string(),
            small_blind: 0.5,
            big_blind: 1.0,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_join_within_threshold_detected() {
        let sessions = vec![session("T1", "alice", Some(0)), session("T1", "bob", Some(8))];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].joiner, "bob");
        assert_eq!(joins[0].preceding_player, "alice");
        assert_eq!(joins[0].time_gap_sec, 8.0);
        assert_eq!(joins[0].table_name, "Table T1");
    }

    #[test]
    fn test_gap_over_threshold_ignored() {
        let sessions = vec![session("T1", "alice", Some(0)), session("T1", "bob", Some(16))];
        assert!(detect_suspicious_joins(&sessions, 15.0).is_empty());
    }

    #[test]
    fn test_gap_exactly_at_threshold_detected() {
        let sessions = vec![session("T1", "alice", Some(0)), session("T1", "bob", Some(15))];
        assert_eq!(detect_suspicious_joins(&sessions, 15.0).len(), 1);
    }

    #[test]
    fn test_chain_produces_pairwise_joins_only() {
        // Starts at t=0, 5, 9: two joins (5 after 0, 9 after 5), never a
        // direct 0→9 event.
        let sessions = vec![
            session("T1", "alice", Some(0)),
            session("T1", "bob", Some(5)),
            session("T1", "carol", Some(9)),
        ];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].joiner, "bob");
        assert_eq!(joins[0].preceding_player, "alice");
        assert_eq!(joins[0].time_gap_sec, 5.0);
        assert_eq!(joins[1].joiner, "carol");
        assert_eq!(joins[1].preceding_player, "bob");
        assert_eq!(joins[1].time_gap_sec, 4.0);
    }

    #[test]
    fn test_no_joins_across_tables() {
        let sessions = vec![session("T1", "alice", Some(0)), session("T2", "bob", Some(3))];
        assert!(detect_suspicious_joins(&sessions, 15.0).is_empty());
    }

    #[test]
    fn test_unsorted_input_is_ordered_per_table() {
        let sessions = vec![
            session("T1", "carol", Some(9)),
            session("T1", "alice", Some(0)),
            session("T1", "bob", Some(5)),
        ];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].preceding_player, "alice");
        assert_eq!(joins[1].preceding_player, "bob");
    }

    #[test]
    fn test_null_start_excluded_from_adjacency() {
        let sessions = vec![
            session("T1", "alice", Some(0)),
            session("T1", "ghost", None),
            session("T1", "bob", Some(8)),
        ];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        // ghost cannot split the alice→bob adjacency.
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].joiner, "bob");
        assert_eq!(joins[0].preceding_player, "alice");
    }

    #[test]
    fn test_tied_starts_have_zero_gap() {
        let sessions = vec![session("T1", "alice", Some(0)), session("T1", "bob", Some(0))];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].time_gap_sec, 0.0);
        // Stable sort keeps export order: alice is the predecessor.
        assert_eq!(joins[0].preceding_player, "alice");
    }

    #[test]
    fn test_zero_threshold_flags_only_simultaneous_starts() {
        let sessions = vec![
            session("T1", "alice", Some(0)),
            session("T1", "bob", Some(0)),
            session("T1", "carol", Some(1)),
        ];
        let joins = detect_suspicious_joins(&sessions, 0.0);

        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].joiner, "bob");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(detect_suspicious_joins(&[], 15.0).is_empty());
    }

    #[test]
    fn test_output_grouped_by_table_then_time() {
        let sessions = vec![
            session("T2", "dora", Some(0)),
            session("T2", "erik", Some(2)),
            session("T1", "alice", Some(0)),
            session("T1", "bob", Some(3)),
        ];
        let joins = detect_suspicious_joins(&sessions, 15.0);

        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].table_id, "T1");
        assert_eq!(joins[1].table_id, "T2");
    }
}
