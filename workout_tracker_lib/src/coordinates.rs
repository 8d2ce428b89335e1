use std::{fmt, future::Future, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkoutError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for Coordinates {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((lat, lng)) = s.split_once(',') else {
            return Err(WorkoutError::InvalidInput(format!("expected 'lat,lng', got '{s}'")));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| WorkoutError::InvalidInput(format!("'{}' is not a coordinate", part.trim())))
        };

        Ok(Self::new(parse(lat)?, parse(lng)?))
    }
}

/// One-shot source of the user's current position.
///
/// The returned future resolves exactly once, either with a position or with
/// [`WorkoutError::LocationUnavailable`]. Nothing retries a failed request.
pub trait LocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>>;
}

/// A provider with a predetermined answer, used by the native driver.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Option<Coordinates>);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates>> {
        let result = self
            .0
            .ok_or_else(|| WorkoutError::LocationUnavailable("no position configured".into()));
        std::future::ready(result)
    }
}
