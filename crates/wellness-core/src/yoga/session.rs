use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WellnessError;
use crate::WellnessResult;

pub const MAX_SCORE: Decimal = dec!(100);

/// One scored attempt at a pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    pub id: String,
    pub pose: String,
    /// 0-100
    pub score: Decimal,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub pose: String,
    pub score: Decimal,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewSession {
    pub fn into_session(self, now: DateTime<Utc>) -> WellnessResult<PracticeSession> {
        let pose = self.pose.trim();
        if pose.is_empty() {
            return Err(WellnessError::invalid("pose", "Pose name cannot be empty."));
        }
        if self.score < Decimal::ZERO || self.score > MAX_SCORE {
            return Err(WellnessError::invalid(
                "score",
                format!("Score must be between 0 and {MAX_SCORE}."),
            ));
        }
        Ok(PracticeSession {
            id: Uuid::new_v4().to_string(),
            pose: pose.to_string(),
            score: self.score,
            duration_seconds: self.duration_seconds,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            timestamp: now,
        })
    }
}

/// Result returned by a pose-scoring backend for one captured frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseScore {
    pub score: Decimal,
    #[serde(default)]
    pub feedback: Vec<String>,
}

/// Seam for the remote pose-analysis endpoint, which takes an image and the
/// name of the pose being attempted.
pub trait PoseScorer {
    fn score_pose(&self, image: &[u8], pose: &str) -> WellnessResult<PoseScore>;
}

/// Fixed-score scorer for offline use and tests.
#[derive(Debug, Clone)]
pub struct FixedScorer {
    pub score: Decimal,
}

impl PoseScorer for FixedScorer {
    fn score_pose(&self, image: &[u8], _pose: &str) -> WellnessResult<PoseScore> {
        if image.is_empty() {
            return Err(WellnessError::invalid("image", "No image data supplied."));
        }
        Ok(PoseScore {
            score: self.score.clamp(Decimal::ZERO, MAX_SCORE),
            feedback: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range_checked() {
        let s = NewSession {
            pose: "Tree".into(),
            score: dec!(101),
            ..Default::default()
        };
        assert!(s.into_session(Utc::now()).is_err());
    }

    #[test]
    fn test_blank_notes_dropped() {
        let s = NewSession {
            pose: " Warrior II ".into(),
            score: dec!(72),
            duration_seconds: 45,
            notes: Some("  ".into()),
        };
        let session = s.into_session(Utc::now()).unwrap();
        assert_eq!(session.pose, "Warrior II");
        assert!(session.notes.is_none());
    }

    #[test]
    fn test_fixed_scorer_rejects_empty_image() {
        let scorer = FixedScorer { score: dec!(80) };
        assert!(scorer.score_pose(&[], "Tree").is_err());
        assert_eq!(scorer.score_pose(&[1, 2, 3], "Tree").unwrap().score, dec!(80));
    }
}
