/// `weather/types.rs` - closed enumerations shared by every weather component
///
/// Both enums carry a stable numeric wire id (what the host and scripts pass
/// around) and a canonical name. Conversions from raw ids or names are the
/// only place an out-of-range identifier can show up.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::{SceneError, WeatherDataError};

/// A 3-component cloud / wind vector attached to a weather phase.
pub type SpatialParam = glam::Vec3;

// ── WeatherKind ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherKind {
    #[default]
    #[serde(rename = "NOSTORM")]
    NoStorm,
    Cloudy,
    #[serde(rename = "LIGHTSTORM")]
    LightStorm,
    #[serde(rename = "MEDIUMSTORM")]
    MediumStorm,
    #[serde(rename = "HEAVYSTORM")]
    HeavyStorm,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::NoStorm,
        WeatherKind::Cloudy,
        WeatherKind::LightStorm,
        WeatherKind::MediumStorm,
        WeatherKind::HeavyStorm,
    ];

    pub fn id(self) -> u32 {
        match self {
            Self::NoStorm => 0,
            Self::Cloudy => 1,
            Self::LightStorm => 2,
            Self::MediumStorm => 3,
            Self::HeavyStorm => 4,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, WeatherDataError> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or_else(|| WeatherDataError::UnknownWeatherKind(id.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoStorm => "NOSTORM",
            Self::Cloudy => "CLOUDY",
            Self::LightStorm => "LIGHTSTORM",
            Self::MediumStorm => "MEDIUMSTORM",
            Self::HeavyStorm => "HEAVYSTORM",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherKind {
    type Err = WeatherDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == upper)
            .ok_or_else(|| WeatherDataError::UnknownWeatherKind(s.to_string()))
    }
}

impl TryFrom<u32> for WeatherKind {
    type Error = WeatherDataError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

// ── SceneId ───────────────────────────────────────────────────────────────────

/// Planets with their own independent weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneId {
    Corellia,
    Dantooine,
    Dathomir,
    Endor,
    Lok,
    Naboo,
    Rori,
    Talus,
    Tatooine,
    Yavin4,
}

impl SceneId {
    pub const ALL: [SceneId; 10] = [
        SceneId::Corellia,
        SceneId::Dantooine,
        SceneId::Dathomir,
        SceneId::Endor,
        SceneId::Lok,
        SceneId::Naboo,
        SceneId::Rori,
        SceneId::Talus,
        SceneId::Tatooine,
        SceneId::Yavin4,
    ];

    /// Wire id. Starts at 1; 0 is never a scene.
    pub fn id(self) -> u32 {
        match self {
            Self::Corellia => 1,
            Self::Dantooine => 2,
            Self::Dathomir => 3,
            Self::Endor => 4,
            Self::Lok => 5,
            Self::Naboo => 6,
            Self::Rori => 7,
            Self::Talus => 8,
            Self::Tatooine => 9,
            Self::Yavin4 => 10,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, SceneError> {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| SceneError::UnknownScene(id.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corellia => "corellia",
            Self::Dantooine => "dantooine",
            Self::Dathomir => "dathomir",
            Self::Endor => "endor",
            Self::Lok => "lok",
            Self::Naboo => "naboo",
            Self::Rori => "rori",
            Self::Talus => "talus",
            Self::Tatooine => "tatooine",
            Self::Yavin4 => "yavin4",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneId {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scene| scene.as_str() == lower)
            .ok_or_else(|| SceneError::UnknownScene(s.to_string()))
    }
}

impl TryFrom<u32> for SceneId {
    type Error = SceneError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl TryFrom<&str> for SceneId {
    type Error = SceneError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        name.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_ids_start_at_corellia_one() {
        assert_eq!(SceneId::Corellia.id(), 1);
        assert_eq!(SceneId::Yavin4.id(), 10);
        assert_eq!(SceneId::from_id(9).unwrap(), SceneId::Tatooine);
    }

    #[test]
    fn scene_zero_and_eleven_are_unknown() {
        assert_eq!(
            SceneId::from_id(0),
            Err(SceneError::UnknownScene("0".to_string()))
        );
        assert!(SceneId::try_from(11u32).is_err());
    }

    #[test]
    fn scene_names_parse_case_insensitively() {
        assert_eq!("Yavin4".parse::<SceneId>().unwrap(), SceneId::Yavin4);
        assert_eq!(SceneId::try_from(" LOK ").unwrap(), SceneId::Lok);
        assert!("kashyyyk".parse::<SceneId>().is_err());
    }

    #[test]
    fn weather_kind_ids_match_wire_values() {
        assert_eq!(WeatherKind::from_id(0).unwrap(), WeatherKind::NoStorm);
        assert_eq!(WeatherKind::from_id(4).unwrap(), WeatherKind::HeavyStorm);
        assert_eq!(
            WeatherKind::from_id(5),
            Err(WeatherDataError::UnknownWeatherKind("5".to_string()))
        );
    }

    #[test]
    fn weather_kind_serde_uses_wire_names() {
        let json = serde_json::to_string(&WeatherKind::LightStorm).unwrap();
        assert_eq!(json, "\"LIGHTSTORM\"");
        let kind: WeatherKind = serde_json::from_str("\"NOSTORM\"").unwrap();
        assert_eq!(kind, WeatherKind::NoStorm);
        assert_eq!("mediumstorm".parse::<WeatherKind>().unwrap(), WeatherKind::MediumStorm);
    }
}
