/// `weather/` - weather data model
///
/// Closed enumerations, validated events and sequences, the error taxonomy
/// and a couple of stock storms.
pub mod error;
pub mod presets;
pub mod sequence;
pub mod types;

pub use error::{SceneError, WeatherDataError, WeatherError};
pub use sequence::{WeatherEvent, WeatherSequence};
pub use types::{SceneId, SpatialParam, WeatherKind};
