/// `scheduler/` - weather sequencing core
///
/// `Sequencer` owns every scene's weather state, runs sequences on per-scene
/// timers and resolves conflicting requests with a per-scene epoch.
mod registry;
pub mod scene_state;
pub mod sequencer;

pub use scene_state::SceneStatus;
pub use sequencer::Sequencer;
