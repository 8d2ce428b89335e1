use thiserror::Error;

use crate::workout::WorkoutId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkoutError {
    /// A submitted metric failed its finiteness or positivity check.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workout {0} is already in the log")]
    DuplicateId(WorkoutId),

    /// The UI referenced a workout the log has never seen.
    #[error("Workout {0} not found")]
    NotFound(WorkoutId),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Form submitted without a selected location")]
    NoPendingLocation,
}

pub type Result<T> = std::result::Result<T, WorkoutError>;
