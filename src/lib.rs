pub mod config;
pub mod scheduler;
pub mod service;
pub mod state;
pub mod stream;
pub mod weather;

use std::path::PathBuf;

use anyhow::Context;
use rand::seq::SliceRandom;

use config::WeatherConfig;
use state::AppState;
use weather::presets;

/// Entry point for `weatherd`: load config, start logging, build the engine,
/// roll one stock storm on the configured scene and report every published
/// change until Ctrl-C.
pub fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = WeatherConfig::load_or_default(config_path.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("weather-timer")
        .build()
        .context("failed to build tokio runtime")?;

    let state = AppState::new(config, runtime.handle().clone());
    log::info!("weather service up, serving {} scene(s)", state.weather.scenes().len());

    runtime.block_on(storm_until_shutdown(&state))
}

async fn storm_until_shutdown(state: &AppState) -> anyhow::Result<()> {
    let mut updates = state.weather.subscribe();

    // Which storm rolls in is the caller's call, never the sequencer's.
    let storms = presets::all()?;
    let storm = storms
        .choose(&mut rand::thread_rng())
        .cloned()
        .context("no stock storms available")?;

    let scene = state.config.storm_scene;
    log::info!(
        "{scene}: rolling a {}-phase storm lasting {:?}",
        storm.len(),
        storm.total_duration()
    );
    state.weather.run_weather_sequence(scene, storm)?;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(u) => log::info!(
                    "[{}] {} cloud={} ({:?}, epoch {})",
                    u.scene, u.kind, u.param, u.cause, u.epoch
                ),
                None => break,
            },
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    log::warn!("ctrl-c handler failed: {e}");
                }
                log::info!("shutting down weather service");
                break;
            }
        }
    }
    Ok(())
}
