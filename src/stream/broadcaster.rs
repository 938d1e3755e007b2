/// `broadcaster.rs` - fan-out of published weather updates
///
/// The sequencer pushes one `WeatherUpdate` per transition into a single
/// tokio broadcast channel. Renderers, audio cues and gameplay systems each
/// hold their own `WeatherSubscription`. Publishing never blocks: a consumer
/// that falls behind loses the oldest updates, the sequencer never waits.
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::weather::{SceneId, SpatialParam, WeatherKind};

/// Default broadcast buffer, in updates.
pub const DEFAULT_CAPACITY: usize = 256;

/// Why a scene's weather changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCause {
    /// First phase of a freshly started sequence.
    SequenceStarted,
    /// A later phase reached by timer or by skipping a zero-length phase.
    SequenceAdvanced,
    /// Direct override, no sequence attached.
    Forced,
}

/// Published state for one scene. Consumers only ever see these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherUpdate {
    pub scene: SceneId,
    pub kind: WeatherKind,
    pub param: SpatialParam,
    pub epoch: u64,
    pub cause: UpdateCause,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

// ── WeatherBroadcaster ────────────────────────────────────────────────────────

/// Shared, cloneable publishing handle.
#[derive(Clone)]
pub struct WeatherBroadcaster {
    tx: broadcast::Sender<WeatherUpdate>,
}

impl WeatherBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Fire-and-forget. Returns how many subscribers the update reached;
    /// zero when nobody is listening, which is not an error.
    pub fn publish(&self, update: WeatherUpdate) -> usize {
        self.tx.send(update).unwrap_or(0)
    }

    pub fn subscribe(&self) -> WeatherSubscription {
        WeatherSubscription {
            rx: self.tx.subscribe(),
            scene: None,
        }
    }
}

impl Default for WeatherBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ── WeatherSubscription ───────────────────────────────────────────────────────

/// Receiving end, optionally narrowed to a single scene.
pub struct WeatherSubscription {
    rx: broadcast::Receiver<WeatherUpdate>,
    scene: Option<SceneId>,
}

impl WeatherSubscription {
    /// Only yield updates for `scene`.
    pub fn for_scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    fn wants(&self, update: &WeatherUpdate) -> bool {
        self.scene.map_or(true, |s| s == update.scene)
    }

    /// Wait for the next matching update. `None` once the broadcaster is gone.
    pub async fn recv(&mut self) -> Option<WeatherUpdate> {
        loop {
            match self.rx.recv().await {
                Ok(update) if self.wants(&update) => return Some(update),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("weather subscriber lagged, {skipped} update(s) dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching update that is already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<WeatherUpdate> {
        loop {
            match self.rx.try_recv() {
                Ok(update) if self.wants(&update) => return Some(update),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("weather subscriber lagged, {skipped} update(s) dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain everything currently buffered.
    pub fn drain(&mut self) -> Vec<WeatherUpdate> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
