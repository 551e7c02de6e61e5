pub mod error;
pub mod storage;
pub mod time_value;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "journal")]
pub mod journal;

#[cfg(feature = "emergency")]
pub mod emergency;

#[cfg(feature = "yoga")]
pub mod yoga;

pub use error::WellnessError;
pub use types::*;

/// Standard result type for all wellness-core operations
pub type WellnessResult<T> = Result<T, WellnessError>;
