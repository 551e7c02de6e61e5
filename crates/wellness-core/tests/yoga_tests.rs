#![cfg(feature = "yoga")]

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use wellness_core::storage::FileStore;
use wellness_core::yoga::session::FixedScorer;
use wellness_core::yoga::{NewSession, ProgressLevel, YogaStore, YOGA_KEY};

#[test]
fn test_sessions_persist_under_yoga_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = YogaStore::new(FileStore::open(dir.path()).unwrap());
    let start = Utc.with_ymd_and_hms(2025, 4, 1, 7, 0, 0).unwrap();

    for (day, score) in [dec!(55), dec!(62), dec!(71)].into_iter().enumerate() {
        store
            .record(
                NewSession {
                    pose: "Warrior II".into(),
                    score,
                    duration_seconds: 45,
                    notes: None,
                },
                start + Duration::days(day as i64),
            )
            .unwrap();
    }

    assert!(dir.path().join(format!("{YOGA_KEY}.json")).exists());

    let reopened = YogaStore::new(FileStore::open(dir.path()).unwrap());
    let progress = reopened.progress("warrior ii").unwrap();
    assert_eq!(progress.sessions, 3);
    assert_eq!(progress.latest_score, dec!(71));
    assert_eq!(progress.best_score, dec!(71));
    assert_eq!(progress.level, ProgressLevel::Intermediate);
    assert_eq!(progress.total_practice_seconds, 135);
}

#[test]
fn test_out_of_range_score_is_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let store = YogaStore::new(FileStore::open(dir.path()).unwrap());

    let result = store.record(
        NewSession {
            pose: "Tree".into(),
            score: dec!(101),
            ..Default::default()
        },
        Utc::now(),
    );

    assert!(result.is_err());
    assert!(store.sessions().unwrap().is_empty());
}

#[test]
fn test_summary_has_one_row_per_pose() {
    let dir = tempfile::tempdir().unwrap();
    let store = YogaStore::new(FileStore::open(dir.path()).unwrap());
    let scorer = FixedScorer { score: dec!(88) };
    let frame = [0u8; 4];

    store.record_scored(&scorer, &frame, "Tree", 30, Utc::now()).unwrap();
    store.record_scored(&scorer, &frame, "tree", 30, Utc::now()).unwrap();
    store.record_scored(&scorer, &frame, "Crow", 10, Utc::now()).unwrap();

    let summary = store.summary().unwrap();
    assert_eq!(summary.len(), 2);
    assert!(summary.iter().all(|p| p.level == ProgressLevel::Mastered));
}
