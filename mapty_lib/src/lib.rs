pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod geolocation;
pub mod map;
pub mod storage;
pub mod view;
pub mod workout;

pub use app::App;
pub use workout::{Activity, Coordinates, Workout, WorkoutKind};
