use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{DecodeError, StoreError, ValidationError},
    workout::{Activity, Coordinates, Metric, Workout},
};

/// String key-value storage, shaped like the browser's localStorage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str);
}

/// In-memory store. Used when the browser refuses access to localStorage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Flat stored shape of a workout. `type` is the discriminant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coordinates,
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// Derived values are written for readability but recomputed when read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordKind {
    Running {
        cadence: f64,
        #[serde(default)]
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default)]
        speed: f64,
    },
}

impl From<Workout> for WorkoutRecord {
    fn from(workout: Workout) -> Self {
        let kind = match *workout.activity() {
            Activity::Running { cadence_spm, pace_min_per_km } => RecordKind::Running {
                cadence: cadence_spm,
                pace: pace_min_per_km,
            },
            Activity::Cycling { elevation_gain_m, speed_km_per_h } => RecordKind::Cycling {
                elevation_gain: elevation_gain_m,
                speed: speed_km_per_h,
            },
        };

        Self {
            id: workout.id().to_string(),
            date: workout.created_at(),
            coords: workout.coordinates(),
            distance: workout.distance_km(),
            duration: workout.duration_min(),
            description: workout.description().to_string(),
            kind,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = ValidationError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let metric = match record.kind {
            RecordKind::Running { cadence, .. } => Metric::Cadence(cadence),
            RecordKind::Cycling { elevation_gain, .. } => Metric::ElevationGain(elevation_gain),
        };

        Workout::build(
            record.date,
            Some(record.id),
            record.coords,
            record.distance,
            record.duration,
            metric,
            Some(record.description),
        )
    }
}

/// Stored records that did not decode into a workout are kept as they were,
/// so writing the list back does not lose them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodedWorkouts {
    pub workouts: Vec<Workout>,
    pub skipped: Vec<serde_json::Value>,
}

/// Encodes the kept records first, then the workouts in list order.
pub fn encode_workouts(workouts: &[Workout], skipped: &[serde_json::Value]) -> Result<String, StoreError> {
    let mut values = skipped.to_vec();
    for workout in workouts {
        values.push(serde_json::to_value(workout).map_err(|err| StoreError::Encode(err.to_string()))?);
    }

    serde_json::to_string(&values).map_err(|err| StoreError::Encode(err.to_string()))
}

/// Decodes a stored list. A blob that is not a JSON array fails as a whole,
/// individual records that fail to decode are set aside in `skipped`.
pub fn decode_workouts(data: &str) -> Result<DecodedWorkouts, DecodeError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(data)?;

    let mut decoded = DecodedWorkouts::default();
    for value in values {
        match serde_json::from_value::<Workout>(value.clone()) {
            Ok(workout) => decoded.workouts.push(workout),
            Err(err) => {
                tracing::warn!("Skipping stored workout: {}", err);
                decoded.skipped.push(value);
            }
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::workout::WorkoutKind;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 26, 11, 35, 34).unwrap()
    }

    #[test]
    fn stored_shape_is_flat_and_tagged() {
        let workout = Workout::running_at(created_at(), Coordinates::new(40.7, -74.0), 5., 30., 150.).unwrap();
        let value = serde_json::to_value(&workout).unwrap();

        assert_eq!(value["type"], "running");
        assert_eq!(value["coords"], json!([40.7, -74.0]));
        assert_eq!(value["distance"], 5.);
        assert_eq!(value["duration"], 30.);
        assert_eq!(value["cadence"], 150.);
        assert_eq!(value["pace"], 6.);
        assert_eq!(value["id"], workout.id());
        assert_eq!(value["description"], workout.description());

        let cycling = Workout::cycling_at(created_at(), Coordinates::new(1., 2.), 20., 60., 300.).unwrap();
        let value = serde_json::to_value(&cycling).unwrap();
        assert_eq!(value["type"], "cycling");
        assert_eq!(value["elevationGain"], 300.);
        assert_eq!(value["speed"], 20.);
    }

    #[test]
    fn reload_keeps_variants_and_fields() {
        let workouts = vec![
            Workout::running_at(created_at(), Coordinates::new(40.7, -74.0), 5.2, 31., 162.).unwrap(),
            Workout::cycling_at(created_at(), Coordinates::new(39.1, -8.2), 27., 95., 523.).unwrap(),
        ];

        let decoded = decode_workouts(&encode_workouts(&workouts, &[]).unwrap()).unwrap().workouts;
        assert_eq!(decoded, workouts);
        assert_eq!(decoded[1].kind(), WorkoutKind::Cycling);
        assert_eq!(decoded[1].speed_km_per_h(), workouts[1].speed_km_per_h());
    }

    #[test]
    fn derived_metrics_are_recomputed() {
        let data = json!([{
            "id": "1234567890",
            "date": "2022-01-26T11:35:34Z",
            "coords": [40.7, -74.0],
            "distance": 5,
            "duration": 30,
            "description": "Running on January 26",
            "type": "running",
            "cadence": 150,
            "pace": 999.0
        }])
        .to_string();

        let workouts = decode_workouts(&data).unwrap().workouts;
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id(), "1234567890");
        assert_eq!(workouts[0].pace_min_per_km(), Some(6.));
        assert_eq!(workouts[0].description(), "Running on January 26");
    }

    #[test]
    fn invalid_records_are_set_aside() {
        let bad_run = json!({ "id": "1", "date": "2022-01-26T11:35:34Z", "coords": [1.0, 2.0], "distance": -1.0, "duration": 30.0, "type": "running", "cadence": 150.0 });
        let swim = json!({ "id": "2", "date": "2022-01-26T11:35:34Z", "coords": [1.0, 2.0], "distance": 10.0, "duration": 30.0, "type": "swimming" });
        let ride = json!({ "id": "3", "date": "2022-01-26T11:35:34Z", "coords": [1.0, 2.0], "distance": 10.0, "duration": 30.0, "type": "cycling", "elevationGain": 40.0 });
        let data = json!([bad_run, swim, ride]).to_string();

        let decoded = decode_workouts(&data).unwrap();
        assert_eq!(decoded.workouts.len(), 1);
        assert_eq!(decoded.workouts[0].id(), "3");
        assert_eq!(decoded.skipped, vec![bad_run.clone(), swim.clone()]);

        // written back untouched
        let encoded: serde_json::Value = serde_json::from_str(&encode_workouts(&decoded.workouts, &decoded.skipped).unwrap()).unwrap();
        assert_eq!(encoded[0], bad_run);
        assert_eq!(encoded[1], swim);
        assert_eq!(encoded[2]["id"], "3");
    }

    #[test]
    fn flat_ride_from_old_data_loads() {
        let data = json!([{
            "id": "4242424242",
            "date": "2022-01-26T11:35:34Z",
            "coords": [40.7, -74.0],
            "distance": 20,
            "duration": 60,
            "description": "Cycling on January 26",
            "type": "cycling",
            "elevationGain": 0,
            "speed": 20
        }])
        .to_string();

        let decoded = decode_workouts(&data).unwrap();
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.workouts[0].speed_km_per_h(), Some(20.));
    }

    #[test]
    fn garbage_blob_fails() {
        assert!(matches!(decode_workouts("not json"), Err(DecodeError::Malformed(_))));
        assert!(decode_workouts("{\"a\": 1}").is_err());
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("workout"), None);

        store.set_item("workout", "[]").unwrap();
        assert_eq!(store.get_item("workout").as_deref(), Some("[]"));

        store.remove_item("workout");
        assert_eq!(store.get_item("workout"), None);
    }
}
