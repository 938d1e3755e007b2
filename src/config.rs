/// `config.rs` - process configuration
///
/// Read once at startup from an optional JSON file. Missing fields take their
/// defaults, so an empty object `{}` is a valid config.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{stream::broadcaster::DEFAULT_CAPACITY, weather::SceneId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Scenes this process serves. Anything else is an unknown scene.
    pub scenes: Vec<SceneId>,
    /// Broadcast buffer for published updates.
    pub update_channel_capacity: usize,
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Scene `weatherd` runs its storm on.
    pub storm_scene: SceneId,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            scenes: SceneId::ALL.to_vec(),
            update_channel_capacity: DEFAULT_CAPACITY,
            log_filter: "info".to_string(),
            storm_scene: SceneId::Corellia,
        }
    }
}

impl WeatherConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes.is_empty() {
            return Err(ConfigError::Invalid("`scenes` must list at least one scene".into()));
        }
        if self.update_channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "`update_channel_capacity` must be greater than zero".into(),
            ));
        }
        if !self.scenes.contains(&self.storm_scene) {
            return Err(ConfigError::Invalid(format!(
                "`storm_scene` {} is not in `scenes`",
                self.storm_scene
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_serve_every_scene() {
        let config = WeatherConfig::default();
        assert_eq!(config.scenes.len(), 10);
        assert_eq!(config.update_channel_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_object_is_the_default() {
        let file = write_config("{}");
        assert_eq!(WeatherConfig::load(file.path()).unwrap(), WeatherConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let file = write_config(r#"{"scenes": ["naboo", "rori"], "storm_scene": "rori"}"#);
        let config = WeatherConfig::load(file.path()).unwrap();
        assert_eq!(config.scenes, vec![SceneId::Naboo, SceneId::Rori]);
        assert_eq!(config.storm_scene, SceneId::Rori);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn unknown_scene_name_fails_to_parse() {
        let file = write_config(r#"{"scenes": ["hoth"]}"#);
        assert!(matches!(
            WeatherConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let file = write_config(r#"{"update_channel_capacity": 0}"#);
        assert!(matches!(
            WeatherConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn storm_scene_must_be_served() {
        let file = write_config(r#"{"scenes": ["endor"]}"#);
        let err = WeatherConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("storm_scene"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            WeatherConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert!(WeatherConfig::load_or_default(None).is_ok());
    }
}
