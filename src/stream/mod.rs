/// `stream/` - publish side of the weather engine
pub mod broadcaster;

pub use broadcaster::{UpdateCause, WeatherBroadcaster, WeatherSubscription, WeatherUpdate};
