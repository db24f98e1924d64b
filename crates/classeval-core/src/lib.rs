pub mod error;
pub mod evaluation;
pub mod sample;
pub mod types;

#[cfg(feature = "roc")]
pub mod roc;

#[cfg(feature = "calibration")]
pub mod calibration;

pub use error::ClassEvalError;
pub use sample::{Sample, SampleSet};
pub use types::*;

/// Standard result type for all classifier evaluation operations
pub type ClassEvalResult<T> = Result<T, ClassEvalError>;
