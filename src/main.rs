// weatherd [config.json]
use std::path::PathBuf;

fn main() {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    if let Err(e) = scene_weather_lib::run(config_path) {
        eprintln!("[weatherd] fatal: {e:#}");
        std::process::exit(1);
    }
}
