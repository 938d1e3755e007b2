/// `weather/error.rs` - error taxonomy for weather data and scene dispatch
///
/// Data errors are raised where a value is built and never reach the
/// sequencer. Scene errors are caller mistakes and are never retried.
use thiserror::Error;

/// Raised while constructing weather kinds, events or sequences.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherDataError {
    #[error("weather event duration must be a finite, non-negative number of seconds (got {0})")]
    InvalidDuration(f32),
    #[error("weather sequence must contain at least one event")]
    EmptySequence,
    #[error("cloud vector must be finite (got {0})")]
    NonFiniteParam(glam::Vec3),
    #[error("unknown weather kind `{0}`")]
    UnknownWeatherKind(String),
}

/// Raised when an operation addresses a scene this process does not serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
}

/// Everything the weather service façade can hand back to a caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Data(#[from] WeatherDataError),
}

impl WeatherError {
    pub fn is_unknown_scene(&self) -> bool {
        matches!(self, WeatherError::Scene(SceneError::UnknownScene(_)))
    }
}
