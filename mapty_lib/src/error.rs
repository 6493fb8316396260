use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("no map position selected for the workout")]
    MissingPosition,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not available")]
    Unavailable,
    #[error("geolocation failed: {0}")]
    Denied(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode workouts: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed workout data: {0}")]
    Malformed(#[from] serde_json::Error),
}
