/// `weather/sequence.rs` - weather events and the sequences built from them
///
/// Both types are immutable once built. Validation runs on construction and on
/// deserialization, so a malformed sequence never exists as a value.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    error::WeatherDataError,
    types::{SpatialParam, WeatherKind},
};

// ── WeatherEvent ──────────────────────────────────────────────────────────────

/// One phase of a storm. A zero duration holds forever when it is the last
/// phase and is skipped instantly anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeatherEvent", into = "RawWeatherEvent")]
pub struct WeatherEvent {
    duration: Duration,
    kind: WeatherKind,
    param: SpatialParam,
}

impl WeatherEvent {
    /// `seconds` must fit a `Duration`. A positive value too small to survive
    /// nanosecond rounding is rejected rather than silently becoming a hold.
    pub fn new(seconds: f32, kind: WeatherKind, param: SpatialParam) -> Result<Self, WeatherDataError> {
        let duration = Duration::try_from_secs_f32(seconds)
            .map_err(|_| WeatherDataError::InvalidDuration(seconds))?;
        if seconds > 0.0 && duration.is_zero() {
            return Err(WeatherDataError::InvalidDuration(seconds));
        }
        if !param.is_finite() {
            return Err(WeatherDataError::NonFiniteParam(param));
        }
        Ok(Self {
            duration,
            kind,
            param,
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    pub fn param(&self) -> SpatialParam {
        self.param
    }

    pub fn is_hold(&self) -> bool {
        self.duration.is_zero()
    }
}

#[derive(Serialize, Deserialize)]
struct RawWeatherEvent {
    duration_secs: f32,
    kind: WeatherKind,
    #[serde(default)]
    param: [f32; 3],
}

impl TryFrom<RawWeatherEvent> for WeatherEvent {
    type Error = WeatherDataError;

    fn try_from(raw: RawWeatherEvent) -> Result<Self, Self::Error> {
        WeatherEvent::new(raw.duration_secs, raw.kind, SpatialParam::from_array(raw.param))
    }
}

impl From<WeatherEvent> for RawWeatherEvent {
    fn from(event: WeatherEvent) -> Self {
        Self {
            duration_secs: event.duration.as_secs_f32(),
            kind: event.kind,
            param: event.param.to_array(),
        }
    }
}

// ── WeatherSequence ───────────────────────────────────────────────────────────

/// Ordered storm lifecycle, never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeatherEvent>", into = "Vec<WeatherEvent>")]
pub struct WeatherSequence {
    events: Vec<WeatherEvent>,
}

impl WeatherSequence {
    pub fn new(events: Vec<WeatherEvent>) -> Result<Self, WeatherDataError> {
        if events.is_empty() {
            return Err(WeatherDataError::EmptySequence);
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[WeatherEvent] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&WeatherEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn first(&self) -> &WeatherEvent {
        &self.events[0]
    }

    pub fn last(&self) -> &WeatherEvent {
        &self.events[self.events.len() - 1]
    }

    /// Sum of all phase durations. Holds count as zero.
    pub fn total_duration(&self) -> Duration {
        self.events.iter().map(|e| e.duration).sum()
    }
}

impl TryFrom<Vec<WeatherEvent>> for WeatherSequence {
    type Error = WeatherDataError;

    fn try_from(events: Vec<WeatherEvent>) -> Result<Self, Self::Error> {
        Self::new(events)
    }
}

impl From<WeatherSequence> for Vec<WeatherEvent> {
    fn from(seq: WeatherSequence) -> Self {
        seq.events
    }
}
