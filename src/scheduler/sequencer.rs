/// `scheduler/sequencer.rs` - drives scenes through their weather sequences
///
/// Every operation on a scene runs under that scene's lock: start, force and
/// timer-driven advancement serialize per scene and never block each other
/// across scenes. Each running scene owns at most one timer task on the
/// tokio runtime. A timer carries the epoch it was armed with and is a silent
/// no-op if the scene has moved on by the time it fires (last writer wins).
use std::{sync::Arc, time::Duration};

use tokio::runtime::Handle;

use super::{
    registry::SceneRegistry,
    scene_state::{SceneStatus, SceneWeatherState},
};
use crate::{
    stream::broadcaster::{UpdateCause, WeatherBroadcaster, WeatherSubscription, WeatherUpdate},
    weather::{SceneError, SceneId, SpatialParam, WeatherKind, WeatherSequence},
};

/// Shared handle. Cheap to clone; all clones drive the same scenes.
#[derive(Clone)]
pub struct Sequencer {
    registry: Arc<SceneRegistry>,
    broadcaster: WeatherBroadcaster,
    runtime: Handle,
}

impl Sequencer {
    pub fn new(
        runtime: Handle,
        scenes: impl IntoIterator<Item = SceneId>,
        broadcaster: WeatherBroadcaster,
    ) -> Self {
        Self {
            registry: Arc::new(SceneRegistry::new(scenes)),
            broadcaster,
            runtime,
        }
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Run `seq` on `scene` from its first phase, replacing anything that was
    /// running there.
    pub fn start_sequence(&self, scene: SceneId, seq: WeatherSequence) -> Result<(), SceneError> {
        let slot = self.registry.slot(scene)?;
        let mut state = slot.lock();

        let (epoch, was_running) = state.supersede();
        if was_running {
            log::info!("{scene}: running sequence superseded (epoch {epoch})");
        }
        log::info!(
            "{scene}: starting {}-phase weather sequence (epoch {epoch})",
            seq.len()
        );

        state.active_sequence = Some(seq);
        self.enter_phase(scene, &mut state, UpdateCause::SequenceStarted);
        Ok(())
    }

    /// Put `scene` into the given weather right now, cancelling any sequence.
    pub fn force_weather(
        &self,
        scene: SceneId,
        kind: WeatherKind,
        param: SpatialParam,
    ) -> Result<(), SceneError> {
        let slot = self.registry.slot(scene)?;
        let mut state = slot.lock();

        let (epoch, was_running) = state.supersede();
        if was_running {
            log::info!("{scene}: running sequence cancelled by direct weather change");
        }
        log::info!("{scene}: weather forced to {kind} {param} (epoch {epoch})");

        state.apply(kind, param);
        self.publish(scene, &state, UpdateCause::Forced);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn scene_weather(&self, scene: SceneId) -> Result<(WeatherKind, SpatialParam), SceneError> {
        let slot = self.registry.slot(scene)?;
        let state = slot.lock();
        Ok((state.current_kind, state.current_param))
    }

    pub fn scene_status(&self, scene: SceneId) -> Result<SceneStatus, SceneError> {
        let slot = self.registry.slot(scene)?;
        let state = slot.lock();
        Ok(state.status(scene))
    }

    pub fn serves(&self, scene: SceneId) -> bool {
        self.registry.serves(scene)
    }

    pub fn scenes(&self) -> Vec<SceneId> {
        self.registry.served().collect()
    }

    pub fn subscribe(&self) -> WeatherSubscription {
        self.broadcaster.subscribe()
    }

    // ── Advancement ───────────────────────────────────────────────────────

    /// Publish the phase under the cursor, then either arm a timer for it or,
    /// for a zero-length phase, keep walking in the same step. A zero-length
    /// last phase holds forever and ends the sequence.
    fn enter_phase(&self, scene: SceneId, state: &mut SceneWeatherState, mut cause: UpdateCause) {
        loop {
            let Some(seq) = state.active_sequence.as_ref() else {
                return;
            };
            let Some(event) = seq.get(state.cursor).copied() else {
                state.finish();
                return;
            };
            let is_last = state.cursor + 1 == seq.len();

            state.apply(event.kind(), event.param());
            self.publish(scene, state, cause);

            if !event.is_hold() {
                self.arm_timer(scene, state, event.duration());
                return;
            }
            if is_last {
                log::info!("{scene}: sequence complete, holding {}", event.kind());
                state.finish();
                return;
            }
            log::debug!("{scene}: phase {} has no duration, skipping", state.cursor);
            state.cursor += 1;
            cause = UpdateCause::SequenceAdvanced;
        }
    }

    fn arm_timer(&self, scene: SceneId, state: &mut SceneWeatherState, after: Duration) {
        let epoch = state.epoch;
        let sequencer = self.clone();
        state.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            sequencer.on_timer(scene, epoch);
        }));
    }

    /// Timer callback. Not reachable from outside the sequencer.
    fn on_timer(&self, scene: SceneId, epoch: u64) {
        let Ok(slot) = self.registry.slot(scene) else {
            return;
        };
        let mut state = slot.lock();

        if state.epoch != epoch {
            log::debug!(
                "{scene}: stale timer from epoch {epoch} ignored (live epoch {})",
                state.epoch
            );
            return;
        }
        // The handle belongs to this very task; dropping it detaches, no abort.
        state.timer = None;

        let len = state.active_sequence.as_ref().map_or(0, WeatherSequence::len);
        state.cursor += 1;
        if state.cursor >= len {
            log::info!("{scene}: sequence complete, holding {}", state.current_kind);
            state.finish();
            return;
        }
        log::debug!("{scene}: advancing to phase {}", state.cursor);
        self.enter_phase(scene, &mut state, UpdateCause::SequenceAdvanced);
    }

    fn publish(&self, scene: SceneId, state: &SceneWeatherState, cause: UpdateCause) {
        let reached = self.broadcaster.publish(WeatherUpdate {
            scene,
            kind: state.current_kind,
            param: state.current_param,
            epoch: state.epoch,
            cause,
            published_at: chrono::Utc::now(),
        });
        log::debug!("{scene}: published {} to {reached} subscriber(s)", state.current_kind);
    }
}
