pub mod activity_log;
pub mod config;
pub mod coordinates;
pub mod coordinator;
pub mod error;
pub mod workout;

pub use activity_log::ActivityLog;
pub use coordinates::{Coordinates, LocationProvider};
pub use coordinator::{Coordinator, FormInput, FormSurface, ListEntry, ListSurface, MapRenderer};
pub use error::{Result, WorkoutError};
pub use workout::{WorkoutId, WorkoutKind, WorkoutMetrics, WorkoutRecord};
