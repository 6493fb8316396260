use const_format::concatcp;

pub const STORAGE_KEY: &str = "workout";
pub const DEFAULT_ZOOM: f64 = 13.;
pub const PAN_DURATION_SECS: f64 = 1.;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.fr/hot/copyright\">OpenStreetMap</a> contributors";

pub const POPUP_MAX_WIDTH: f64 = 250.;
pub const POPUP_MIN_WIDTH: f64 = 100.;
pub const POPUP_CLASS_SUFFIX: &str = "-popup";
pub const RUNNING_POPUP_CLASS: &str = concatcp!("running", POPUP_CLASS_SUFFIX);
pub const CYCLING_POPUP_CLASS: &str = concatcp!("cycling", POPUP_CLASS_SUFFIX);

pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";
pub const POSITION_UNAVAILABLE_MESSAGE: &str = "Could not get your position.";
pub const HOME_POPUP: &str = "You are here";

/// Everything the map factory needs besides the center.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: f64,
    /// Popup text of the marker dropped at the user's position. None disables the marker.
    pub home_popup: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: TILE_URL.into(),
            attribution: TILE_ATTRIBUTION.into(),
            max_zoom: 19.,
            home_popup: Some(HOME_POPUP.into()),
        }
    }
}

/// How the map moves to a new center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl PanOptions {
    /// Jump straight to the new view.
    pub fn instant() -> Self {
        Self { animate: false, duration_secs: 0. }
    }
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: PAN_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub storage_key: String,
    pub zoom: f64,
    /// Used when moving to a workout from the list.
    pub pan: PanOptions,
    pub map: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.into(),
            zoom: DEFAULT_ZOOM,
            pan: PanOptions::default(),
            map: MapConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_class_names() {
        assert_eq!(RUNNING_POPUP_CLASS, "running-popup");
        assert_eq!(CYCLING_POPUP_CLASS, "cycling-popup");
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, "workout");
        assert_eq!(config.zoom, 13.);
        assert_eq!(config.pan, PanOptions { animate: true, duration_secs: 1. });
        assert!(!PanOptions::instant().animate);
        assert!(config.map.tile_url.contains("openstreetmap"));
    }
}
