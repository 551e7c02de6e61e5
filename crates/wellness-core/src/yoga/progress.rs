use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::session::PracticeSession;

/// Number of most recent sessions that decide the level.
pub const RECENT_WINDOW: usize = 5;

const INTERMEDIATE_THRESHOLD: Decimal = dec!(50);
const ADVANCED_THRESHOLD: Decimal = dec!(70);
const MASTERED_THRESHOLD: Decimal = dec!(85);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressLevel {
    Beginner,
    Intermediate,
    Advanced,
    Mastered,
}

impl ProgressLevel {
    pub fn from_recent_average(avg: Decimal) -> Self {
        if avg >= MASTERED_THRESHOLD {
            ProgressLevel::Mastered
        } else if avg >= ADVANCED_THRESHOLD {
            ProgressLevel::Advanced
        } else if avg >= INTERMEDIATE_THRESHOLD {
            ProgressLevel::Intermediate
        } else {
            ProgressLevel::Beginner
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseProgress {
    pub pose: String,
    pub sessions: u32,
    pub best_score: Decimal,
    pub average_score: Decimal,
    pub latest_score: Decimal,
    pub recent_average: Decimal,
    pub level: ProgressLevel,
    pub total_practice_seconds: u64,
    pub last_practiced: DateTime<Utc>,
}

/// Progress for one pose (case-insensitive name match). None when the pose
/// has never been practised.
pub fn pose_progress(sessions: &[PracticeSession], pose: &str) -> Option<PoseProgress> {
    let wanted = pose.trim().to_lowercase();
    let mut matching: Vec<&PracticeSession> = sessions
        .iter()
        .filter(|s| s.pose.to_lowercase() == wanted)
        .collect();
    if matching.is_empty() {
        return None;
    }
    matching.sort_by_key(|s| s.timestamp);

    let count = Decimal::from(matching.len() as u64);
    let total: Decimal = matching.iter().map(|s| s.score).sum();
    let recent: Vec<Decimal> = matching
        .iter()
        .rev()
        .take(RECENT_WINDOW)
        .map(|s| s.score)
        .collect();
    let recent_average =
        recent.iter().copied().sum::<Decimal>() / Decimal::from(recent.len() as u64);

    let latest = matching[matching.len() - 1];
    Some(PoseProgress {
        pose: latest.pose.clone(),
        sessions: matching.len() as u32,
        best_score: matching.iter().map(|s| s.score).max().unwrap_or(Decimal::ZERO),
        average_score: (total / count).round_dp(2),
        latest_score: latest.score,
        recent_average: recent_average.round_dp(2),
        level: ProgressLevel::from_recent_average(recent_average),
        total_practice_seconds: matching.iter().map(|s| u64::from(s.duration_seconds)).sum(),
        last_practiced: latest.timestamp,
    })
}

/// One entry per pose practised, ordered by pose name.
pub fn progress_summary(sessions: &[PracticeSession]) -> Vec<PoseProgress> {
    let mut poses: BTreeMap<String, &str> = BTreeMap::new();
    for s in sessions {
        poses.entry(s.pose.to_lowercase()).or_insert(s.pose.as_str());
    }
    poses
        .values()
        .filter_map(|pose| pose_progress(sessions, pose))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn session(pose: &str, score: Decimal, day: i64) -> PracticeSession {
        PracticeSession {
            id: format!("{pose}-{day}"),
            pose: pose.into(),
            score,
            duration_seconds: 60,
            notes: None,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap() + Duration::days(day),
        }
    }

    #[test]
    fn test_level_uses_recent_window() {
        let mut sessions: Vec<PracticeSession> =
            (0..5).map(|d| session("Tree", dec!(30), d)).collect();
        sessions.extend((5..10).map(|d| session("Tree", dec!(90), d)));
        let p = pose_progress(&sessions, "tree").unwrap();
        assert_eq!(p.level, ProgressLevel::Mastered);
        assert_eq!(p.average_score, dec!(60));
        assert_eq!(p.sessions, 10);
        assert_eq!(p.total_practice_seconds, 600);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(ProgressLevel::from_recent_average(dec!(49.99)), ProgressLevel::Beginner);
        assert_eq!(ProgressLevel::from_recent_average(dec!(50)), ProgressLevel::Intermediate);
        assert_eq!(ProgressLevel::from_recent_average(dec!(70)), ProgressLevel::Advanced);
        assert_eq!(ProgressLevel::from_recent_average(dec!(85)), ProgressLevel::Mastered);
    }

    #[test]
    fn test_latest_is_by_timestamp() {
        let sessions = vec![session("Crow", dec!(80), 3), session("Crow", dec!(40), 1)];
        let p = pose_progress(&sessions, "Crow").unwrap();
        assert_eq!(p.latest_score, dec!(80));
    }

    #[test]
    fn test_summary_per_pose() {
        let sessions = vec![
            session("Tree", dec!(60), 0),
            session("tree", dec!(70), 1),
            session("Crow", dec!(20), 2),
        ];
        let summary = progress_summary(&sessions);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].pose, "Crow");
        assert_eq!(summary[1].sessions, 2);
        assert!(pose_progress(&sessions, "Lotus").is_none());
    }
}
