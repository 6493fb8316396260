use crate::workout::{Activity, Workout, WorkoutKind};

pub const RUNNING_ICON: &str = "🏃‍♂️";
pub const CYCLING_ICON: &str = "🚴‍♀️";
pub const DURATION_ICON: &str = "⏱";
pub const PACE_ICON: &str = "⚡️";
pub const CADENCE_ICON: &str = "🦶🏼";
pub const ELEVATION_ICON: &str = "⛰";

pub fn activity_icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => RUNNING_ICON,
        WorkoutKind::Cycling => CYCLING_ICON,
    }
}

/// The page outside the map: entry form, workout list and browser dialogs.
pub trait Surface {
    /// Reveal the entry form and focus the distance field.
    fn show_form(&mut self);
    /// Hide the entry form and clear its inputs.
    fn hide_form(&mut self);
    /// Insert a row directly after the form, so the newest row ends up on top.
    fn insert_row(&mut self, row: WorkoutRow);
    fn alert(&mut self, message: &str);
    /// Start the application over from the persisted state.
    fn reload(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Everything needed to draw one workout in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRow {
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<Detail>,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        let mut details = vec![
            Detail::new(activity_icon(workout.kind()), workout.distance_km().to_string(), "km"),
            Detail::new(DURATION_ICON, workout.duration_min().to_string(), "min"),
        ];

        match *workout.activity() {
            Activity::Running { cadence_spm, pace_min_per_km } => {
                details.push(Detail::new(PACE_ICON, format!("{:.1}", pace_min_per_km), "min/km"));
                details.push(Detail::new(CADENCE_ICON, cadence_spm.to_string(), "spm"));
            }
            Activity::Cycling { elevation_gain_m, speed_km_per_h } => {
                details.push(Detail::new(PACE_ICON, format!("{:.1}", speed_km_per_h), "km/h"));
                details.push(Detail::new(ELEVATION_ICON, elevation_gain_m.to_string(), "m"));
            }
        }

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: workout.description().to_string(),
            details,
        }
    }
}
