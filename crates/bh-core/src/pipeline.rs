//! The analysis pipeline: load → detect → profile.
//!
//! One synchronous batch pass over a fully materialized session table.
//! There is no shared state between runs and no suspension point inside
//! the pipeline; callers that want parallelism can shard the input by
//! table, but correctness never requires it.

use bh_common::{AnalysisDataset, Result, SessionRecord};
use std::path::Path;
use tracing::info;

use crate::detect::detect_suspicious_joins;
use crate::loader::load_sessions;
use crate::profile::build_profiles;

/// Run the full analysis over an already-loaded session table.
pub fn analyze(sessions: Vec<SessionRecord>, threshold_secs: f64) -> AnalysisDataset {
    let suspicious_joins = detect_suspicious_joins(&sessions, threshold_secs);
    let profiles = build_profiles(&sessions, &suspicious_joins);

    AnalysisDataset {
        suspicious_joins,
        bumphunter_profiles: profiles.hunters,
        target_profiles: profiles.targets,
        original_data: sessions,
    }
}

/// Load a CSV session table and run the full analysis.
pub fn analyze_file(input: &Path, threshold_secs: f64) -> Result<AnalysisDataset> {
    let sessions = load_sessions(input)?;
    let dataset = analyze(sessions, threshold_secs);

    info!(
        sessions = dataset.original_data.len(),
        joins = dataset.suspicious_joins.len(),
        hunters = dataset.active_hunter_count(),
        max_score = dataset.max_score(),
        "Analysis complete"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analyze_file_end_to_end() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "tableId,tableName,username,startSession,endSession,gameType,limitType,smallBlind,bigBlind\n\
             T1,Rio,A,2024-03-01 10:00:00,,NLHE,No Limit,0.5,1\n\
             T1,Rio,B,2024-03-01 10:00:08,,NLHE,No Limit,0.5,1\n\
             T1,Rio,C,2024-03-01 10:00:30,,NLHE,No Limit,0.5,1\n"
        )
        .unwrap();
        file.flush().unwrap();

        let dataset = analyze_file(file.path(), 15.0).unwrap();

        assert_eq!(dataset.original_data.len(), 3);
        assert_eq!(dataset.suspicious_joins.len(), 1);
        assert_eq!(dataset.suspicious_joins[0].joiner, "B");
        assert_eq!(dataset.suspicious_joins[0].preceding_player, "A");
        assert_eq!(dataset.suspicious_joins[0].time_gap_sec, 8.0);
        assert_eq!(dataset.suspicious_joins[0].table_name, "Rio");

        assert_eq!(dataset.bumphunter_profiles.len(), 3);
        assert_eq!(dataset.target_profiles.len(), 3);
        assert_eq!(dataset.bumphunter_profiles[0].username, "B");
        assert!(dataset.bumphunter_profiles[0].score > 0);
    }

    #[test]
    fn test_empty_table_degenerate_but_valid() {
        let dataset = analyze(Vec::new(), 15.0);
        assert!(dataset.suspicious_joins.is_empty());
        assert!(dataset.bumphunter_profiles.is_empty());
        assert!(dataset.target_profiles.is_empty());
    }
}
