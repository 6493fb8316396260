use crate::{
    config::{PanOptions, POPUP_MAX_WIDTH, POPUP_MIN_WIDTH},
    view::activity_icon,
    workout::{Coordinates, Workout},
};

/// The parts of an interactive map the app drives.
///
/// Creating a map (tile layer, click handler) is left to the factory handed to
/// [`crate::App::position_resolved`], since it depends on the page.
pub trait MapWidget {
    fn set_view(&mut self, center: Coordinates, zoom: f64, pan: &PanOptions);

    /// Adds a marker, binds a popup with the given options and opens it.
    fn add_marker(&mut self, at: Coordinates, popup: &MarkerPopup);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub content: String,
    pub class_name: Option<String>,
    pub max_width: Option<f64>,
    pub min_width: Option<f64>,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl MarkerPopup {
    /// A popup with the map widget's default options.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            class_name: None,
            max_width: None,
            min_width: None,
            auto_close: true,
            close_on_click: true,
        }
    }

    /// Icon and description, kept open until the user closes it.
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            content: format!("{} {}", activity_icon(workout.kind()), workout.description()),
            class_name: Some(workout.kind().popup_class().to_string()),
            max_width: Some(POPUP_MAX_WIDTH),
            min_width: Some(POPUP_MIN_WIDTH),
            auto_close: false,
            close_on_click: false,
        }
    }
}
