use tokio::runtime::Handle;

use crate::{
    config::WeatherConfig,
    scheduler::Sequencer,
    service::WeatherService,
    stream::WeatherBroadcaster,
};

/// Process-wide state, built once at startup and passed by reference to
/// whatever needs the weather service. Nothing looks it up globally.
pub struct AppState {
    pub config: WeatherConfig,
    pub weather: WeatherService,
}

impl AppState {
    /// Timers for running sequences are spawned on `runtime`.
    pub fn new(config: WeatherConfig, runtime: Handle) -> Self {
        let broadcaster = WeatherBroadcaster::new(config.update_channel_capacity);
        let sequencer = Sequencer::new(runtime, config.scenes.iter().copied(), broadcaster);

        Self {
            config,
            weather: WeatherService::new(sequencer),
        }
    }
}
