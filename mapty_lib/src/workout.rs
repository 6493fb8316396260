use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::{CYCLING_POPUP_CLASS, RUNNING_POPUP_CLASS},
    error::ValidationError,
};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Length of the id, taken from the tail of the creation time in milliseconds.
const ID_LEN: usize = 10;

/// A `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(coordinates: Coordinates) -> Self {
        (coordinates.latitude, coordinates.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase name, as used in storage, form values and css classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn popup_class(&self) -> &'static str {
        match self {
            WorkoutKind::Running => RUNNING_POPUP_CLASS,
            WorkoutKind::Cycling => CYCLING_POPUP_CLASS,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }
}

/// The variant specific part of a workout, including its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running { cadence_spm: f64, pace_min_per_km: f64 },
    Cycling { elevation_gain_m: f64, speed_km_per_h: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Input for the variant specific field, before the derived metric exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Metric {
    Cadence(f64),
    ElevationGain(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "crate::storage::WorkoutRecord", into = "crate::storage::WorkoutRecord")]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    activity: Activity,
}

impl Workout {
    pub fn running(coordinates: Coordinates, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Result<Self, ValidationError> {
        Self::running_at(Utc::now(), coordinates, distance_km, duration_min, cadence_spm)
    }

    pub fn cycling(coordinates: Coordinates, distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Result<Self, ValidationError> {
        Self::cycling_at(Utc::now(), coordinates, distance_km, duration_min, elevation_gain_m)
    }

    pub fn running_at(created_at: DateTime<Utc>, coordinates: Coordinates, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Result<Self, ValidationError> {
        Self::build(created_at, None, coordinates, distance_km, duration_min, Metric::Cadence(cadence_spm), None)
    }

    pub fn cycling_at(created_at: DateTime<Utc>, coordinates: Coordinates, distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Result<Self, ValidationError> {
        Self::build(created_at, None, coordinates, distance_km, duration_min, Metric::ElevationGain(elevation_gain_m), None)
    }

    /// Validates all inputs and computes the derived fields.
    /// `id` and `description` are only passed when restoring a stored workout.
    pub(crate) fn build(
        created_at: DateTime<Utc>,
        id: Option<String>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        metric: Metric,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        require_positive("distance", distance_km)?;
        require_positive("duration", duration_min)?;

        let activity = match metric {
            Metric::Cadence(cadence_spm) => {
                require_positive("cadence", cadence_spm)?;
                Activity::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                }
            }
            Metric::ElevationGain(elevation_gain_m) => {
                require_non_negative("elevation gain", elevation_gain_m)?;
                Activity::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: distance_km / (duration_min / 60.),
                }
            }
        };

        let id = id.unwrap_or_else(|| make_id(&created_at));
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| describe(activity.kind(), &created_at));

        Ok(Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description,
            activity,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            Activity::Running { .. } => None,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value <= 0. {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value < 0. {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn make_id(created_at: &DateTime<Utc>) -> String {
    let millis = created_at.timestamp_millis().to_string();
    millis[millis.len().saturating_sub(ID_LEN)..].to_string()
}

/// "Running on January 26", using the creation date in local time.
pub fn describe(kind: WorkoutKind, created_at: &DateTime<Utc>) -> String {
    let local = created_at.with_timezone(&Local);
    format!("{} on {} {}", kind.title(), MONTHS[local.month0() as usize], local.day())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn here() -> Coordinates {
        Coordinates::new(40.7, -74.0)
    }

    #[test]
    fn pace_is_duration_over_distance() {
        for (distance, duration) in [(5., 30.), (3.3, 17.2), (42.195, 181.7), (0.1, 0.7)] {
            let workout = Workout::running(here(), distance, duration, 170.).unwrap();
            assert_eq!(workout.pace_min_per_km(), Some(duration / distance));
            assert_eq!(workout.speed_km_per_h(), None);
        }
    }

    #[test]
    fn speed_is_distance_per_hour() {
        for (distance, duration) in [(27., 95.), (12.5, 33.3), (160., 300.)] {
            let workout = Workout::cycling(here(), distance, duration, 523.).unwrap();
            assert_eq!(workout.speed_km_per_h(), Some(distance / (duration / 60.)));
            assert_eq!(workout.kind(), WorkoutKind::Cycling);
        }
    }

    #[test]
    fn rejects_bad_numbers() {
        for bad in [0., -1., f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Workout::running(here(), bad, 30., 150.).is_err());
            assert!(Workout::running(here(), 5., bad, 150.).is_err());
            assert!(Workout::running(here(), 5., 30., bad).is_err());
            assert!(Workout::cycling(here(), bad, 30., 100.).is_err());
            assert!(Workout::cycling(here(), 5., bad, 100.).is_err());
        }
        for bad in [-1., f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Workout::cycling(here(), 5., 30., bad).is_err());
        }
    }

    #[test]
    fn flat_ride_is_valid() {
        let workout = Workout::cycling(here(), 20., 60., 0.).unwrap();
        assert_eq!(*workout.activity(), Activity::Cycling { elevation_gain_m: 0., speed_km_per_h: 20. });

        let err = Workout::cycling(here(), 20., 60., -5.).unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "elevation gain", value: -5. });
    }

    #[test]
    fn reports_offending_field() {
        let err = Workout::running(here(), 5., 30., -3.).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { field: "cadence", value: -3. });

        let err = Workout::cycling(here(), f64::NAN, 30., 10.).unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite { field: "distance", .. }));
    }

    #[test]
    fn description_uses_local_creation_date() {
        let created_at = Local.with_ymd_and_hms(2022, 1, 26, 13, 35, 34).unwrap().with_timezone(&Utc);

        let running = Workout::running_at(created_at, here(), 5., 30., 150.).unwrap();
        assert_eq!(running.description(), "Running on January 26");

        let cycling = Workout::cycling_at(created_at, here(), 5., 30., 150.).unwrap();
        assert_eq!(cycling.description(), "Cycling on January 26");
    }

    #[test]
    fn description_month_names() {
        let created_at = Local.with_ymd_and_hms(2023, 12, 1, 12, 0, 0).unwrap().with_timezone(&Utc);
        assert_eq!(describe(WorkoutKind::Running, &created_at), "Running on December 1");
    }

    #[test]
    fn id_is_tail_of_millis() {
        let created_at = Utc.timestamp_millis_opt(1_643_196_934_123).unwrap();
        let workout = Workout::running_at(created_at, here(), 5., 30., 150.).unwrap();
        assert_eq!(workout.id(), "3196934123");
        assert_eq!(workout.created_at(), created_at);
        assert_eq!(workout.coordinates(), here());
    }

    #[test]
    fn kind_names() {
        assert_eq!(WorkoutKind::parse("running"), Some(WorkoutKind::Running));
        assert_eq!(WorkoutKind::parse("cycling"), Some(WorkoutKind::Cycling));
        assert_eq!(WorkoutKind::parse("swimming"), None);
        assert_eq!(WorkoutKind::Cycling.as_str(), "cycling");
    }
}
