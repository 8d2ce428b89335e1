use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    coordinates::Coordinates,
    error::{Result, WorkoutError},
};

/// Number of trailing digits of the millisecond timestamp kept in an id.
const ID_DIGITS: usize = 10;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn from_timestamp<Tz: TimeZone>(timestamp: DateTime<Tz>) -> Self {
        let millis = timestamp.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(ID_DIGITS);
        Self(millis[start..].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    /// Lowercase tag, as used by form selectors and CSS classes.
    pub fn tag(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => f.write_str("Running"),
            WorkoutKind::Cycling => f.write_str("Cycling"),
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(WorkoutError::InvalidInput(format!("unknown workout kind '{other}'"))),
        }
    }
}

/// Kind specific payload. The derived value is filled in once by
/// [`WorkoutRecord::new_at`].
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutMetrics {
    Running { cadence_spm: u32, pace_min_per_km: f64 },
    Cycling { elevation_gain_m: f64, speed_kmh: f64 },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WorkoutRecord {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    location: Coordinates,
    distance_km: f64,
    duration_min: f64,
    title: String,
    metrics: WorkoutMetrics,
}

impl WorkoutRecord {
    /// Creates a record stamped with the current local time.
    pub fn new(location: Coordinates, distance_km: f64, duration_min: f64, kind: WorkoutKind, kind_value: f64) -> Result<Self> {
        Self::new_at(location, distance_km, duration_min, kind, kind_value, Local::now())
    }

    /// Validates the inputs and builds the record with all derived values.
    ///
    /// `kind_value` is the cadence for running and the elevation gain for
    /// cycling. Cadence has to be a positive whole number, elevation gain only
    /// has to be finite and not negative, so flat rides with zero gain are fine.
    ///
    /// The title uses the calendar date in `created_at`'s own timezone, the
    /// stored timestamp is normalised to UTC.
    pub fn new_at<Tz>(
        location: Coordinates,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
        kind_value: f64,
        created_at: DateTime<Tz>,
    ) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        ensure_positive("distance", distance_km)?;
        ensure_positive("duration", duration_min)?;

        let metrics = match kind {
            WorkoutKind::Running => {
                ensure_positive("cadence", kind_value)?;
                if kind_value.fract() != 0. || kind_value > u32::MAX as f64 {
                    return Err(WorkoutError::InvalidInput(format!("cadence must be a whole number of steps, got {kind_value}")));
                }

                WorkoutMetrics::Running {
                    cadence_spm: kind_value as u32,
                    pace_min_per_km: ensure_finite("pace", duration_min / distance_km)?,
                }
            }
            WorkoutKind::Cycling => {
                if !kind_value.is_finite() || kind_value < 0. {
                    return Err(WorkoutError::InvalidInput(format!("elevation gain must be zero or more, got {kind_value}")));
                }

                WorkoutMetrics::Cycling {
                    elevation_gain_m: kind_value,
                    speed_kmh: ensure_finite("speed", distance_km / (duration_min / 60.))?,
                }
            }
        };

        Ok(Self {
            id: WorkoutId::from_timestamp(created_at.clone()),
            title: format!("{} on {}", kind, created_at.format("%B %-d")),
            created_at: created_at.with_timezone(&Utc),
            location,
            distance_km,
            duration_min,
            metrics,
        })
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn metrics(&self) -> &WorkoutMetrics {
        &self.metrics
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.metrics {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
            WorkoutMetrics::Cycling { .. } => None,
        }
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        match self.metrics {
            WorkoutMetrics::Cycling { speed_kmh, .. } => Some(speed_kmh),
            WorkoutMetrics::Running { .. } => None,
        }
    }

    /// Text shown in the marker popup.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.kind().icon(), self.title)
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(WorkoutError::InvalidInput(format!("{name} must be a positive number, got {value}")))
    }
}

// Extreme but positive inputs can still overflow the division.
fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidInput(format!("{name} is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn april_14() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let record = WorkoutRecord::new_at((10., 20.).into(), 5., 25., WorkoutKind::Running, 150., april_14()).unwrap();

        assert_eq!(record.pace_min_per_km(), Some(5.0));
        assert_eq!(record.speed_kmh(), None);
        assert_eq!(record.metrics(), &WorkoutMetrics::Running { cadence_spm: 150, pace_min_per_km: 5.0 });
        assert_eq!(record.title(), "Running on April 14");
        assert_eq!(record.kind(), WorkoutKind::Running);
    }

    #[test]
    fn cycling_accepts_zero_elevation() {
        let record = WorkoutRecord::new_at((10., 20.).into(), 20., 60., WorkoutKind::Cycling, 0., april_14()).unwrap();

        assert_eq!(record.speed_kmh(), Some(20.0));
        assert!(record.title().contains("Cycling"));
    }

    #[test]
    fn title_uses_full_month_and_unpadded_day() {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let record = WorkoutRecord::new_at((0., 0.).into(), 12., 40., WorkoutKind::Cycling, 120., created).unwrap();
        assert_eq!(record.title(), "Cycling on January 5");
    }

    #[test]
    fn derived_values_hold_over_a_spread_of_inputs() {
        for (distance, duration) in [(0.4, 3.), (5., 25.), (42.195, 181.5), (100., 59.9)] {
            let run = WorkoutRecord::new_at((0., 0.).into(), distance, duration, WorkoutKind::Running, 170., april_14()).unwrap();
            assert_eq!(run.pace_min_per_km(), Some(duration / distance));

            let ride = WorkoutRecord::new_at((0., 0.).into(), distance, duration, WorkoutKind::Cycling, 35.5, april_14()).unwrap();
            assert_eq!(ride.speed_kmh(), Some(distance / (duration / 60.)));
        }
    }

    #[test]
    fn rejects_non_positive_common_metrics() {
        for (distance, duration) in [(-1., 25.), (0., 25.), (5., 0.), (5., -3.), (f64::NAN, 25.), (5., f64::INFINITY)] {
            for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
                let result = WorkoutRecord::new_at((0., 0.).into(), distance, duration, kind, 100., april_14());
                assert!(matches!(result, Err(WorkoutError::InvalidInput(_))), "{distance} / {duration} / {kind}");
            }
        }
    }

    #[test]
    fn cadence_must_be_a_positive_whole_number() {
        for cadence in [0., -150., 150.5, f64::NAN] {
            let result = WorkoutRecord::new_at((0., 0.).into(), 5., 25., WorkoutKind::Running, cadence, april_14());
            assert!(matches!(result, Err(WorkoutError::InvalidInput(_))), "cadence {cadence}");
        }
    }

    #[test]
    fn elevation_must_be_finite_and_not_negative() {
        for elevation in [-1., f64::NAN, f64::NEG_INFINITY] {
            let result = WorkoutRecord::new_at((0., 0.).into(), 20., 60., WorkoutKind::Cycling, elevation, april_14());
            assert!(matches!(result, Err(WorkoutError::InvalidInput(_))), "elevation {elevation}");
        }
    }

    #[test]
    fn title_uses_the_date_of_the_local_clock() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = new_york.with_ymd_and_hms(2025, 4, 14, 23, 30, 0).unwrap();
        let record = WorkoutRecord::new_at((0., 0.).into(), 5., 25., WorkoutKind::Running, 150., evening).unwrap();

        assert_eq!(record.title(), "Running on April 14");
        assert_eq!(record.created_at(), Utc.with_ymd_and_hms(2025, 4, 15, 4, 30, 0).unwrap());
    }

    #[test]
    fn rejects_inputs_whose_derived_metric_overflows() {
        let run = WorkoutRecord::new_at((0., 0.).into(), 1e-310, 25., WorkoutKind::Running, 150., april_14());
        assert!(matches!(run, Err(WorkoutError::InvalidInput(_))));

        let ride = WorkoutRecord::new_at((0., 0.).into(), 20., 1e-310, WorkoutKind::Cycling, 0., april_14());
        assert!(matches!(ride, Err(WorkoutError::InvalidInput(_))));
    }

    #[test]
    fn id_is_the_tail_of_the_millisecond_timestamp() {
        let created = Utc.timestamp_millis_opt(1_744_623_000_123).unwrap();
        assert_eq!(WorkoutId::from_timestamp(created).as_str(), "4623000123");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!(" cycling ".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn serializes_metrics_with_kind_tag() {
        let record = WorkoutRecord::new_at((10., 20.).into(), 20., 60., WorkoutKind::Cycling, 0., april_14()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["metrics"]["kind"], "cycling");
        assert_eq!(json["metrics"]["speed_kmh"], 20.0);
    }
}
