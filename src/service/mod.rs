/// `service/` - the weather service façade addressed by external callers
pub mod weather_service;

pub use weather_service::{SceneKey, WeatherService};
