use chrono::{DateTime, Utc};

use crate::{
    error::ValidationError,
    workout::{Coordinates, Workout, WorkoutKind},
};

/// Values read from the entry form. Fields the browser could not parse are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    pub cadence_spm: f64,
    pub elevation_gain_m: f64,
}

impl WorkoutForm {
    /// Builds a form from raw input strings.
    pub fn from_inputs(kind: WorkoutKind, distance: &str, duration: &str, cadence: &str, elevation: &str) -> Self {
        Self {
            kind,
            distance_km: parse_number(distance),
            duration_min: parse_number(duration),
            cadence_spm: parse_number(cadence),
            elevation_gain_m: parse_number(elevation),
        }
    }

    /// Validates the fields relevant to the chosen kind and creates the workout.
    pub fn into_workout(self, created_at: DateTime<Utc>, at: Coordinates) -> Result<Workout, ValidationError> {
        match self.kind {
            WorkoutKind::Running => Workout::running_at(created_at, at, self.distance_km, self.duration_min, self.cadence_spm),
            WorkoutKind::Cycling => Workout::cycling_at(created_at, at, self.distance_km, self.duration_min, self.elevation_gain_m),
        }
    }
}

fn parse_number(input: &str) -> f64 {
    input.trim().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inputs() {
        let form = WorkoutForm::from_inputs(WorkoutKind::Running, " 5 ", "30", "150", "");
        assert_eq!(form.distance_km, 5.);
        assert_eq!(form.duration_min, 30.);
        assert_eq!(form.cadence_spm, 150.);
        assert!(form.elevation_gain_m.is_nan());
    }

    #[test]
    fn only_checks_fields_of_its_kind() {
        let running = WorkoutForm::from_inputs(WorkoutKind::Running, "5", "30", "150", "abc");
        assert!(running.into_workout(Utc::now(), Coordinates::new(0., 0.)).is_ok());

        let cycling = WorkoutForm::from_inputs(WorkoutKind::Cycling, "5", "30", "abc", "120");
        let workout = cycling.into_workout(Utc::now(), Coordinates::new(0., 0.)).unwrap();
        assert_eq!(workout.kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn empty_field_is_invalid() {
        let form = WorkoutForm::from_inputs(WorkoutKind::Running, "", "30", "150", "");
        assert!(matches!(
            form.into_workout(Utc::now(), Coordinates::new(0., 0.)),
            Err(ValidationError::NotFinite { field: "distance", .. })
        ));
    }
}
