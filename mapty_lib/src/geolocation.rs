use crate::{error::GeolocationError, workout::Coordinates};

pub type PositionCallback = Box<dyn FnOnce(Result<Coordinates, GeolocationError>)>;

/// One-shot device position lookup. Implementations call `on_result` at most once,
/// possibly long after `request_position` returned.
pub trait Geolocation {
    fn request_position(&self, on_result: PositionCallback);
}
