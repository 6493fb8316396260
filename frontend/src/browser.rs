use std::{cell::RefCell, rc::Rc};

use gloo_console::{error, info};
use gloo_utils::window;
use mapty_lib::{
    error::{GeolocationError, StoreError},
    geolocation::{Geolocation, PositionCallback},
    storage::{KeyValueStore, MemoryStore},
    view::{Surface, WorkoutRow},
    Coordinates,
};
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{GeolocationPosition, GeolocationPositionError, Storage};

/// localStorage, or memory when the browser refuses it (private mode, disabled storage).
pub enum PageStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl PageStore {
    pub fn open() -> Self {
        match window().local_storage() {
            Ok(Some(storage)) => Self::Local(storage),
            _ => {
                error!("localStorage unavailable, workouts will not survive a reload");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(store) => store.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(|err| StoreError::Write {
                key: key.to_string(),
                reason: format!("{:?}", err),
            }),
            Self::Memory(store) => store.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) {
        match self {
            Self::Local(storage) => {
                if let Err(err) = storage.remove_item(key) {
                    error!(format!("Failed to remove {}: {:?}", key, err));
                }
            }
            Self::Memory(store) => store.remove_item(key),
        }
    }
}

pub struct BrowserGeolocation;

impl Geolocation for BrowserGeolocation {
    fn request_position(&self, on_result: PositionCallback) {
        let geolocation = match window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(_) => {
                on_result(Err(GeolocationError::Unavailable));
                return;
            }
        };

        // Only one of the two callbacks fires
        let slot = Rc::new(RefCell::new(Some(on_result)));

        let success_slot = slot.clone();
        let success = Closure::once_into_js(move |position: GeolocationPosition| {
            let coords = position.coords();
            let callback = success_slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback(Ok(Coordinates::new(coords.latitude(), coords.longitude())));
            }
        });

        let failure_slot = slot.clone();
        let failure = Closure::once_into_js(move |err: GeolocationPositionError| {
            let callback = failure_slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback(Err(GeolocationError::Denied(err.message())));
            }
        });

        if let Err(err) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
            error!(format!("getCurrentPosition failed: {:?}", err));
            let callback = slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback(Err(GeolocationError::Unavailable));
            }
        }
    }
}

/// The page state the root component renders from.
#[derive(Debug, Default)]
pub struct BrowserSurface {
    pub rows: Vec<WorkoutRow>,
    pub form_open: bool,
    focus_distance: bool,
    form_cleared: bool,
}

impl BrowserSurface {
    /// True once after the form was opened, so the distance input can take focus.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_distance)
    }

    /// True once after the form was hidden, so its inputs can be emptied.
    pub fn take_cleared(&mut self) -> bool {
        std::mem::take(&mut self.form_cleared)
    }
}

impl Surface for BrowserSurface {
    fn show_form(&mut self) {
        self.form_open = true;
        self.focus_distance = true;
    }

    fn hide_form(&mut self) {
        self.form_open = false;
        self.form_cleared = true;
    }

    fn insert_row(&mut self, row: WorkoutRow) {
        self.rows.insert(0, row);
    }

    fn alert(&mut self, message: &str) {
        if window().alert_with_message(message).is_err() {
            error!(format!("Alert failed: {}", message));
        }
    }

    fn reload(&mut self) {
        info!("Reloading");
        if let Err(err) = window().location().reload() {
            error!(format!("Reload failed: {:?}", err));
        }
    }
}
