/// `scheduler/registry.rs` - process-wide scene table
///
/// Maps each served scene to its own lock. The outer lock only guards lazy
/// insertion and is never held while a scene lock is taken, so work on
/// different scenes never contends.
use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use parking_lot::Mutex;

use super::scene_state::SceneWeatherState;
use crate::weather::{SceneError, SceneId};

pub(crate) type SceneSlot = Arc<Mutex<SceneWeatherState>>;

pub(crate) struct SceneRegistry {
    served: BTreeSet<SceneId>,
    slots: Mutex<HashMap<SceneId, SceneSlot>>,
}

impl SceneRegistry {
    pub fn new(served: impl IntoIterator<Item = SceneId>) -> Self {
        Self {
            served: served.into_iter().collect(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn serves(&self, scene: SceneId) -> bool {
        self.served.contains(&scene)
    }

    pub fn served(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.served.iter().copied()
    }

    /// Slot for `scene`, created with default weather on first use.
    pub fn slot(&self, scene: SceneId) -> Result<SceneSlot, SceneError> {
        if !self.serves(scene) {
            return Err(SceneError::UnknownScene(scene.to_string()));
        }
        let mut slots = self.slots.lock();
        let slot = slots
            .entry(scene)
            .or_insert_with(|| Arc::new(Mutex::new(SceneWeatherState::new())));
        Ok(Arc::clone(slot))
    }

    /// Number of scenes that have been touched so far.
    #[cfg(test)]
    pub fn initialised(&self) -> usize {
        self.slots.lock().len()
    }
}
