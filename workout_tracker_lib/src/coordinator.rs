use chrono::{DateTime, FixedOffset, Local, TimeDelta, TimeZone};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    activity_log::ActivityLog,
    config::MapConfig,
    coordinates::{Coordinates, LocationProvider},
    error::{Result, WorkoutError},
    workout::{WorkoutId, WorkoutKind, WorkoutMetrics, WorkoutRecord},
};

pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";
pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Could not get your position";

/// The map widget: view setup, markers with popups and panning.
pub trait MapRenderer {
    fn set_view(&mut self, at: Coordinates, zoom: f64);
    fn add_marker(&mut self, at: Coordinates, label: &str);
    fn recenter(&mut self, at: Coordinates);
}

/// The workout input form.
pub trait FormSurface {
    fn show(&mut self);
    fn focus_first_field(&mut self);
    fn reset_and_hide(&mut self);
    /// Blocking, user visible notice (validation failure, missing position).
    fn show_message(&mut self, message: &str);
}

/// The list of logged workouts next to the map.
pub trait ListSurface {
    fn append_entry(&mut self, entry: ListEntry);
}

/// Raw field contents of the form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormValues {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    pub cadence_or_elevation: f64,
}

impl FormInput {
    /// Converts the fields to numbers. Text that is not a number becomes NaN
    /// and is left for the record factory to reject.
    pub fn values(&self) -> Result<FormValues> {
        let kind: WorkoutKind = self.kind.parse()?;
        let kind_field = match kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        };

        Ok(FormValues {
            kind,
            distance_km: parse_number(&self.distance),
            duration_min: parse_number(&self.duration),
            cadence_or_elevation: parse_number(kind_field),
        })
    }
}

fn parse_number(field: &str) -> f64 {
    field.trim().parse().unwrap_or(f64::NAN)
}

/// Summary of one workout, as shown in the list.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Pace for runs, speed for rides.
    pub metric: f64,
    pub metric_unit: &'static str,
    /// Cadence for runs, elevation gain for rides.
    pub detail: f64,
    pub detail_unit: &'static str,
}

impl ListEntry {
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    pub fn metric_text(&self) -> String {
        format!("{:.1}", self.metric)
    }

    pub fn detail_text(&self) -> String {
        match self.kind {
            WorkoutKind::Running => format!("{}", self.detail),
            WorkoutKind::Cycling => format!("{:.0}", self.detail),
        }
    }
}

impl From<&WorkoutRecord> for ListEntry {
    fn from(record: &WorkoutRecord) -> Self {
        let (metric, metric_unit, detail, detail_unit) = match *record.metrics() {
            WorkoutMetrics::Running { cadence_spm, pace_min_per_km } => (pace_min_per_km, "min/km", cadence_spm as f64, "spm"),
            WorkoutMetrics::Cycling { elevation_gain_m, speed_kmh } => (speed_kmh, "km/h", elevation_gain_m, "m"),
        };

        Self {
            id: record.id().clone(),
            kind: record.kind(),
            title: record.title().to_owned(),
            distance_km: record.distance_km(),
            duration_min: record.duration_min(),
            metric,
            metric_unit,
            detail,
            detail_unit,
        }
    }
}

/// Glue between the UI events and the activity log.
///
/// Owns every piece of mutable session state: the log, the location waiting
/// for a form submit, and the collaborators that draw the map and the panel.
pub struct Coordinator<M, P> {
    map: M,
    panel: P,
    log: ActivityLog,
    pending_location: Option<Coordinates>,
    config: MapConfig,
    clock: Box<dyn FnMut() -> DateTime<FixedOffset>>,
    // Stamp of the newest record, ids are derived from it
    last_created_at: Option<DateTime<FixedOffset>>,
}

impl<M, P> Coordinator<M, P>
where
    M: MapRenderer,
    P: FormSurface + ListSurface,
{
    pub fn new(map: M, panel: P, config: MapConfig) -> Self {
        Self {
            map,
            panel,
            log: ActivityLog::new(),
            pending_location: None,
            config,
            clock: Box::new(|| Local::now().fixed_offset()),
            last_created_at: None,
        }
    }

    /// Replaces the source of record timestamps. Titles use the calendar
    /// date in the clock's timezone.
    pub fn with_clock<Tz: TimeZone + 'static>(mut self, mut clock: impl FnMut() -> DateTime<Tz> + 'static) -> Self {
        self.clock = Box::new(move || clock().fixed_offset());
        self
    }

    /// Current time, pushed past the previous record so ids never repeat
    /// when submits land within the same millisecond.
    fn next_timestamp(&mut self) -> DateTime<FixedOffset> {
        let now = (self.clock)();
        match self.last_created_at {
            Some(last) if now <= last => last + TimeDelta::milliseconds(1),
            _ => now,
        }
    }

    /// Asks the provider for the position once and sets up the map view.
    pub async fn start<L: LocationProvider>(&mut self, provider: &L) -> Result<Coordinates> {
        let position = provider.current_position().await;
        self.on_position_resolved(position)
    }

    /// Second half of [`Coordinator::start`], for hosts that await the
    /// provider outside the coordinator.
    pub fn on_position_resolved(&mut self, position: Result<Coordinates>) -> Result<Coordinates> {
        match position {
            Ok(at) => {
                debug!(%at, zoom = self.config.default_zoom, "Initialising map view");
                self.map.set_view(at, self.config.default_zoom);
                Ok(at)
            }
            Err(err) => {
                warn!(%err, "No position, map stays uninitialised");
                self.panel.show_message(LOCATION_UNAVAILABLE_MESSAGE);
                Err(err)
            }
        }
    }

    pub fn on_location_selected(&mut self, at: Coordinates) {
        debug!(%at, "Location selected");
        self.pending_location = Some(at);
        self.panel.show();
        self.panel.focus_first_field();
    }

    /// Creates a workout at the pending location from the submitted form.
    ///
    /// Invalid input is reported to the user and returned without touching the
    /// log; the pending location is kept so the form can be corrected.
    pub fn on_form_submitted(&mut self, input: &FormInput) -> Result<WorkoutId> {
        let Some(location) = self.pending_location else {
            error!("Form submitted with no location selected");
            return Err(WorkoutError::NoPendingLocation);
        };

        let created_at = self.next_timestamp();
        let record = input
            .values()
            .and_then(|v| WorkoutRecord::new_at(location, v.distance_km, v.duration_min, v.kind, v.cadence_or_elevation, created_at));

        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "Rejected workout input");
                self.panel.show_message(INVALID_INPUT_MESSAGE);
                self.panel.focus_first_field();
                return Err(err);
            }
        };

        let record = self.log.append(record).inspect_err(|err| error!(%err, "Could not log workout"))?;
        self.last_created_at = Some(created_at);

        self.map.add_marker(record.location(), &record.marker_label());
        self.panel.append_entry(ListEntry::from(record));
        self.panel.reset_and_hide();
        self.pending_location = None;

        Ok(record.id().clone())
    }

    /// Pans the map to the workout behind a clicked list entry.
    pub fn on_list_entry_selected(&mut self, id: &WorkoutId) -> Result<()> {
        let record = self
            .log
            .find_by_id(id)
            .inspect_err(|err| error!(%err, "List entry out of sync with activity log"))?;

        self.map.recenter(record.location());
        Ok(())
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn pending_location(&self) -> Option<Coordinates> {
        self.pending_location
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
