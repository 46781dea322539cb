//! Hunter and target profile aggregation.
//!
//! Consumes the suspicious-join events plus the full session table and
//! builds the two dual views: who each user tends to join right after
//! (hunter), and who tends to join right after them (target). Every
//! username in the table gets a profile, including users with no
//! suspicious activity at all.
//!
//! Determinism: profiles are seeded in first-appearance order over the
//! session table, counterpart counters are ordered maps, and most-common
//! selection uses a strictly-greater comparison, so count ties resolve
//! to the lexicographically smallest counterpart. The final sort breaks
//! ties by username ascending. Two runs over the same input are
//! bit-for-bit identical.

use bh_common::{HunterCount, HunterProfile, SessionRecord, SuspiciousJoin, TargetCount, TargetProfile};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::score::{composite_score, percentage};

/// The two profile views produced by one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    /// Hunter profiles, sorted by score descending then username.
    pub hunters: Vec<HunterProfile>,
    /// Target profiles, sorted by joined_after_count descending then
    /// username.
    pub targets: Vec<TargetProfile>,
}

/// Build hunter and target profiles from the session table and the
/// detected suspicious joins.
pub fn build_profiles(sessions: &[SessionRecord], joins: &[SuspiciousJoin]) -> ProfileSet {
    // Roster in first-appearance order, with total session counts over
    // the whole table (null-start records included).
    let mut roster: Vec<&str> = Vec::new();
    let mut total_sessions: HashMap<&str, u64> = HashMap::new();
    for session in sessions {
        let count = total_sessions.entry(&session.username).or_insert(0);
        if *count == 0 {
            roster.push(&session.username);
        }
        *count += 1;
    }

    // Bidirectional counters: joiner → target → count and
    // target → hunter → count. Ordered inner maps fix the most-common
    // tie-break to the lexicographically smallest counterpart.
    let mut target_counter: HashMap<&str, BTreeMap<&str, u64>> = HashMap::new();
    let mut hunter_counter: HashMap<&str, BTreeMap<&str, u64>> = HashMap::new();
    let mut join_after: HashMap<&str, u64> = HashMap::new();
    let mut joined_after: HashMap<&str, u64> = HashMap::new();

    for join in joins {
        let joiner = join.joiner.as_str();
        let target = join.preceding_player.as_str();

        *target_counter
            .entry(joiner)
            .or_default()
            .entry(target)
            .or_insert(0) += 1;
        *hunter_counter
            .entry(target)
            .or_default()
            .entry(joiner)
            .or_insert(0) += 1;
        *join_after.entry(joiner).or_insert(0) += 1;
        *joined_after.entry(target).or_insert(0) += 1;
    }

    let mut hunters = Vec::with_capacity(roster.len());
    let mut targets = Vec::with_capacity(roster.len());

    for username in &roster {
        let sessions_by_user = total_sessions.get(username).copied().unwrap_or(0);
        hunters.push(hunter_profile(
            username,
            sessions_by_user,
            join_after.get(username).copied().unwrap_or(0),
            target_counter.get(username),
        ));
        targets.push(target_profile(
            username,
            sessions_by_user,
            joined_after.get(username).copied().unwrap_or(0),
            hunter_counter.get(username),
        ));
    }

    // Deterministic presentation order; username ascending breaks ties.
    hunters.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.username.cmp(&b.username))
    });
    targets.sort_by(|a, b| {
        b.joined_after_count
            .cmp(&a.joined_after_count)
            .then_with(|| a.username.cmp(&b.username))
    });

    info!(
        users = roster.len(),
        hunters_flagged = hunters.iter().filter(|h| h.join_after_count > 0).count(),
        "Profile aggregation complete"
    );

    ProfileSet { hunters, targets }
}

/// Assemble one hunter profile.
fn hunter_profile(
    username: &str,
    total_sessions: u64,
    join_after_count: u64,
    counter: Option<&BTreeMap<&str, u64>>,
) -> HunterProfile {
    let (most_common_target, most_common_target_count) = most_common(counter);
    let targets = counter
        .map(|c| {
            c.iter()
                .map(|(target, count)| TargetCount {
                    target: (*target).to_string(),
                    count: *count,
                })
                .collect()
        })
        .unwrap_or_default();

    let join_after_percentage = percentage(join_after_count, total_sessions);
    let target_consistency = percentage(most_common_target_count, join_after_count);
    let score = if join_after_count > 0 {
        composite_score(join_after_count, join_after_percentage, target_consistency)
    } else {
        0
    };

    HunterProfile {
        username: username.to_string(),
        join_after_count,
        join_after_percentage,
        targets,
        most_common_target,
        most_common_target_count,
        target_consistency,
        total_sessions,
        score,
    }
}

/// Assemble one target profile.
fn target_profile(
    username: &str,
    total_sessions: u64,
    joined_after_count: u64,
    counter: Option<&BTreeMap<&str, u64>>,
) -> TargetProfile {
    let (most_common_hunter, most_common_hunter_count) = most_common(counter);
    let hunters = counter
        .map(|c| {
            c.iter()
                .map(|(hunter, count)| HunterCount {
                    hunter: (*hunter).to_string(),
                    count: *count,
                })
                .collect()
        })
        .unwrap_or_default();

    TargetProfile {
        username: username.to_string(),
        joined_after_count,
        joined_after_percentage: percentage(joined_after_count, total_sessions),
        hunters,
        most_common_hunter,
        most_common_hunter_count,
        hunter_consistency: percentage(most_common_hunter_count, joined_after_count),
        total_sessions,
    }
}

/// Counterpart with the highest count. Iteration is in key order and the
/// comparison strictly greater, so ties go to the lexicographically
/// smallest counterpart.
fn most_common(counter: Option<&BTreeMap<&str, u64>>) -> (Option<String>, u64) {
    let mut best: Option<(&str, u64)> = None;
    if let Some(counter) = counter {
        for (name, count) in counter {
            if best.map_or(true, |(_, best_count)| *count > best_count) {
                best = Some((*name, *count));
            }
        }
    }
    match best {
        Some((name, count)) => (Some(name.to_string()), count),
        None => (None, 0),
    }
}
