use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    config::{AppConfig, PanOptions, INVALID_INPUT_MESSAGE, POSITION_UNAVAILABLE_MESSAGE},
    error::{GeolocationError, ValidationError},
    form::WorkoutForm,
    map::{MapWidget, MarkerPopup},
    storage::{decode_workouts, encode_workouts, KeyValueStore},
    view::{Surface, WorkoutRow},
    workout::{Coordinates, Workout},
};

/// The application controller.
///
/// Owns the workout list and keeps the map markers, the list rows on the
/// surface and the persisted store in line with it. Every method runs to
/// completion on the UI thread, one event at a time.
pub struct App<M, S, U> {
    config: AppConfig,
    map: Option<M>,
    pending_position: Option<Coordinates>,
    workouts: Vec<Workout>,
    /// Stored records that did not decode, written back untouched.
    skipped: Vec<serde_json::Value>,
    /// Set when the stored blob could not be read at all, so it is not overwritten.
    persist_blocked: bool,
    store: S,
    surface: U,
    clock: fn() -> DateTime<Utc>,
}

impl<M, S, U> App<M, S, U>
where
    M: MapWidget,
    S: KeyValueStore,
    U: Surface,
{
    pub fn new(config: AppConfig, store: S, surface: U) -> Self {
        Self {
            config,
            map: None,
            pending_position: None,
            workouts: Vec::new(),
            skipped: Vec::new(),
            persist_blocked: false,
            store,
            surface,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the workout list with the persisted one and renders a row for each.
    /// Markers follow once the map exists. Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        let Some(data) = self.store.get_item(&self.config.storage_key) else {
            debug!("No stored workouts");
            return 0;
        };

        let decoded = match decode_workouts(&data) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!("Ignoring stored workouts, new ones will not be saved: {}", err);
                self.persist_blocked = true;
                return 0;
            }
        };
        if !decoded.skipped.is_empty() {
            warn!("Keeping {} stored records that could not be read", decoded.skipped.len());
        }
        self.workouts = decoded.workouts;
        self.skipped = decoded.skipped;

        for workout in &self.workouts {
            self.surface.insert_row(WorkoutRow::from(workout));
        }

        info!("Loaded {} workouts", self.workouts.len());
        self.workouts.len()
    }

    /// Answer of a [`crate::geolocation::Geolocation`] request. Creates the map
    /// around the user's position, or tells the user there won't be one.
    pub fn position_resolved<F>(&mut self, result: Result<Coordinates, GeolocationError>, create_map: F)
    where
        F: FnOnce(Coordinates, &AppConfig) -> M,
    {
        let center = match result {
            Ok(center) => center,
            Err(err) => {
                warn!("No map this session: {}", err);
                self.surface.alert(POSITION_UNAVAILABLE_MESSAGE);
                return;
            }
        };

        if self.map.is_some() {
            debug!("Map already created, ignoring position {:?}", center);
            return;
        }

        info!("Position acquired at {:?}", center);
        let mut map = create_map(center, &self.config);
        map.set_view(center, self.config.zoom, &PanOptions::instant());

        if let Some(text) = &self.config.map.home_popup {
            map.add_marker(center, &MarkerPopup::plain(text.clone()));
        }

        for workout in &self.workouts {
            map.add_marker(workout.coordinates(), &MarkerPopup::for_workout(workout));
        }

        self.map = Some(map);
    }

    /// Map click. The position is used for the next submitted workout.
    pub fn open_form(&mut self, at: Coordinates) {
        self.pending_position = Some(at);
        self.surface.show_form();
    }

    /// Creates a workout from the form at the last clicked position.
    ///
    /// Invalid input is reported to the user and leaves everything untouched,
    /// including the form.
    pub fn submit(&mut self, form: WorkoutForm) -> Result<&Workout, ValidationError> {
        let Some(at) = self.pending_position else {
            warn!("Workout submitted without a map position");
            return Err(ValidationError::MissingPosition);
        };

        let workout = match form.into_workout((self.clock)(), at) {
            Ok(workout) => workout,
            Err(err) => {
                debug!("Rejected workout: {}", err);
                self.surface.alert(INVALID_INPUT_MESSAGE);
                return Err(err);
            }
        };

        info!("New workout {}: {}", workout.id(), workout.description());

        if let Some(map) = self.map.as_mut() {
            map.add_marker(at, &MarkerPopup::for_workout(&workout));
        }
        self.surface.insert_row(WorkoutRow::from(&workout));
        self.surface.hide_form();

        self.workouts.push(workout);
        self.pending_position = None;
        self.persist();

        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Centers the map on a workout from the list. Returns false when there is
    /// no map yet or the id is unknown.
    pub fn move_to_workout(&mut self, id: &str) -> bool {
        let Some(map) = self.map.as_mut() else {
            return false;
        };
        let Some(workout) = self.workouts.iter().find(|w| w.id() == id) else {
            debug!("No workout with id {}", id);
            return false;
        };

        map.set_view(workout.coordinates(), self.config.zoom, &self.config.pan);
        true
    }

    /// Drops all persisted workouts and reloads the application.
    pub fn reset(&mut self) {
        info!("Resetting {} workouts", self.workouts.len());
        self.store.remove_item(&self.config.storage_key);
        self.workouts.clear();
        self.skipped.clear();
        self.persist_blocked = false;
        self.pending_position = None;
        self.surface.reload();
    }

    fn persist(&mut self) {
        if self.persist_blocked {
            warn!("Workouts not saved, the stored data could not be read");
            return;
        }

        let result = encode_workouts(&self.workouts, &self.skipped)
            .and_then(|data| self.store.set_item(&self.config.storage_key, &data));

        if let Err(err) = result {
            warn!("Workouts not saved: {}", err);
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    pub fn pending_position(&self) -> Option<Coordinates> {
        self.pending_position
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }
}
