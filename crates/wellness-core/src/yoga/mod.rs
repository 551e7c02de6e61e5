//! Yoga practice history and per-pose progression levels.

pub mod progress;
pub mod session;
pub mod store;

pub use progress::{pose_progress, progress_summary, PoseProgress, ProgressLevel};
pub use session::{NewSession, PoseScore, PoseScorer, PracticeSession};
pub use store::{YogaStore, YOGA_KEY};
