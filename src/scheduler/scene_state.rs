/// `scheduler/scene_state.rs` - per-scene weather record
///
/// One `SceneWeatherState` exists per served scene and lives behind its own
/// lock inside the registry. Only the sequencer touches it.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::{task::JoinHandle, time::Instant};

use crate::weather::{SceneId, SpatialParam, WeatherKind, WeatherSequence};

pub(crate) struct SceneWeatherState {
    pub current_kind: WeatherKind,
    pub current_param: SpatialParam,
    pub active_sequence: Option<WeatherSequence>,
    pub cursor: usize,
    /// Bumped on every start / force. Timers carry the value they were armed
    /// with and do nothing once it no longer matches.
    pub epoch: u64,
    pub phase_started_at: Instant,
    pub timer: Option<JoinHandle<()>>,
}

impl SceneWeatherState {
    pub fn new() -> Self {
        Self {
            current_kind: WeatherKind::NoStorm,
            current_param: SpatialParam::ZERO,
            active_sequence: None,
            cursor: 0,
            epoch: 0,
            phase_started_at: Instant::now(),
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active_sequence.is_some()
    }

    /// Invalidate whatever was scheduled before and drop the running
    /// sequence. Returns the new epoch and whether a sequence was cut short.
    pub fn supersede(&mut self) -> (u64, bool) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let was_running = self.active_sequence.take().is_some();
        self.cursor = 0;
        self.epoch += 1;
        (self.epoch, was_running)
    }

    pub fn apply(&mut self, kind: WeatherKind, param: SpatialParam) {
        self.current_kind = kind;
        self.current_param = param;
        self.phase_started_at = Instant::now();
    }

    /// Sequence ran out: keep the last weather, go idle.
    pub fn finish(&mut self) {
        self.active_sequence = None;
        self.cursor = 0;
        self.timer = None;
    }

    pub fn status(&self, scene: SceneId) -> SceneStatus {
        SceneStatus {
            scene,
            kind: self.current_kind,
            param: self.current_param,
            running: self.is_running(),
            cursor: self.active_sequence.as_ref().map(|_| self.cursor),
            sequence_len: self.active_sequence.as_ref().map(WeatherSequence::len),
            epoch: self.epoch,
            elapsed: self.phase_started_at.elapsed(),
        }
    }
}

/// Read-only snapshot of a scene handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneStatus {
    pub scene: SceneId,
    pub kind: WeatherKind,
    pub param: SpatialParam,
    pub running: bool,
    /// Index of the phase currently playing, `None` when idle.
    pub cursor: Option<usize>,
    pub sequence_len: Option<usize>,
    pub epoch: u64,
    /// Time spent in the current phase (or since the last change when idle).
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherEvent;

    fn seq() -> WeatherSequence {
        WeatherSequence::new(vec![
            WeatherEvent::new(5.0, WeatherKind::Cloudy, SpatialParam::ZERO).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn new_scene_is_idle_and_clear() {
        let state = SceneWeatherState::new();
        let status = state.status(SceneId::Talus);
        assert_eq!(status.kind, WeatherKind::NoStorm);
        assert_eq!(status.param, SpatialParam::ZERO);
        assert!(!status.running);
        assert_eq!(status.cursor, None);
        assert_eq!(status.epoch, 0);
    }

    #[test]
    fn supersede_bumps_epoch_and_drops_sequence() {
        let mut state = SceneWeatherState::new();
        assert_eq!(state.supersede(), (1, false));
        state.active_sequence = Some(seq());
        state.cursor = 0;
        assert!(state.is_running());
        assert_eq!(state.supersede(), (2, true));
        assert!(!state.is_running());
    }

    #[test]
    fn finish_keeps_current_weather() {
        let mut state = SceneWeatherState::new();
        state.active_sequence = Some(seq());
        state.apply(WeatherKind::Cloudy, SpatialParam::Y);
        state.finish();
        let status = state.status(SceneId::Rori);
        assert!(!status.running);
        assert_eq!(status.kind, WeatherKind::Cloudy);
        assert_eq!(status.param, SpatialParam::Y);
    }
}
