use chrono::{DateTime, Utc};
use tracing::info;

use super::progress::{pose_progress, progress_summary, PoseProgress};
use super::session::{NewSession, PoseScorer, PracticeSession};
use crate::error::WellnessError;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::WellnessResult;

/// Storage key for the practice history.
pub const YOGA_KEY: &str = "yoga_progress";

#[derive(Debug)]
pub struct YogaStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> YogaStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn sessions(&self) -> WellnessResult<Vec<PracticeSession>> {
        Ok(load_json(&self.store, YOGA_KEY)?.unwrap_or_default())
    }

    pub fn record(&self, draft: NewSession, now: DateTime<Utc>) -> WellnessResult<PracticeSession> {
        let session = draft.into_session(now)?;
        let mut sessions = self.sessions()?;
        sessions.push(session.clone());
        save_json(&self.store, YOGA_KEY, &sessions)?;
        info!(pose = %session.pose, score = %session.score, "practice session recorded");
        Ok(session)
    }

    /// Score a captured frame with `scorer` and record the result.
    pub fn record_scored(
        &self,
        scorer: &dyn PoseScorer,
        image: &[u8],
        pose: &str,
        duration_seconds: u32,
        now: DateTime<Utc>,
    ) -> WellnessResult<PracticeSession> {
        let scored = scorer.score_pose(image, pose)?;
        let notes = (!scored.feedback.is_empty()).then(|| scored.feedback.join("; "));
        self.record(
            NewSession {
                pose: pose.to_string(),
                score: scored.score,
                duration_seconds,
                notes,
            },
            now,
        )
    }

    pub fn delete(&self, id: &str) -> WellnessResult<PracticeSession> {
        let mut sessions = self.sessions()?;
        let pos = sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WellnessError::not_found("Practice session", id))?;
        let removed = sessions.remove(pos);
        save_json(&self.store, YOGA_KEY, &sessions)?;
        Ok(removed)
    }

    pub fn progress(&self, pose: &str) -> WellnessResult<PoseProgress> {
        pose_progress(&self.sessions()?, pose)
            .ok_or_else(|| WellnessError::not_found("Pose history", pose))
    }

    pub fn summary(&self) -> WellnessResult<Vec<PoseProgress>> {
        Ok(progress_summary(&self.sessions()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::yoga::session::FixedScorer;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_scored_session() {
        let store = YogaStore::new(MemoryStore::new());
        let scorer = FixedScorer { score: dec!(77) };
        let session = store
            .record_scored(&scorer, &[0xFF, 0xD8], "Downward Dog", 30, Utc::now())
            .unwrap();
        assert_eq!(session.score, dec!(77));
        assert_eq!(store.progress("downward dog").unwrap().sessions, 1);
    }

    #[test]
    fn test_unknown_pose_progress() {
        let store = YogaStore::new(MemoryStore::new());
        assert!(matches!(
            store.progress("Lotus"),
            Err(WellnessError::NotFound { .. })
        ));
    }
}
