/// `service/weather_service.rs` - boundary contract for scripts and subsystems
///
/// Stateless. Turns caller-supplied scene identifiers (typed, numeric wire id
/// or name) into a `SceneId`, checks the cloud vector, then hands off to the
/// sequencer. Rejections never touch scene state.
use crate::{
    scheduler::{SceneStatus, Sequencer},
    stream::WeatherSubscription,
    weather::{
        SceneError, SceneId, SpatialParam, WeatherDataError, WeatherError, WeatherKind,
        WeatherSequence,
    },
};

/// Anything a caller may use to name a scene.
pub trait SceneKey {
    fn resolve(self) -> Result<SceneId, SceneError>;
}

impl SceneKey for SceneId {
    fn resolve(self) -> Result<SceneId, SceneError> {
        Ok(self)
    }
}

impl SceneKey for u32 {
    fn resolve(self) -> Result<SceneId, SceneError> {
        SceneId::from_id(self)
    }
}

impl SceneKey for &str {
    fn resolve(self) -> Result<SceneId, SceneError> {
        self.parse()
    }
}

#[derive(Clone)]
pub struct WeatherService {
    sequencer: Sequencer,
}

impl WeatherService {
    pub fn new(sequencer: Sequencer) -> Self {
        Self { sequencer }
    }

    /// Start a storm lifecycle on a scene, replacing whatever runs there.
    pub fn run_weather_sequence(
        &self,
        scene: impl SceneKey,
        seq: WeatherSequence,
    ) -> Result<(), WeatherError> {
        let scene = self.resolve(scene)?;
        self.sequencer.start_sequence(scene, seq).map_err(|e| self.rejected(e))
    }

    /// Set a scene's weather immediately, cancelling any running sequence.
    pub fn set_scene_weather(
        &self,
        scene: impl SceneKey,
        kind: WeatherKind,
        cloud_vector: SpatialParam,
    ) -> Result<(), WeatherError> {
        let scene = self.resolve(scene)?;
        if !cloud_vector.is_finite() {
            return Err(WeatherDataError::NonFiniteParam(cloud_vector).into());
        }
        self.sequencer
            .force_weather(scene, kind, cloud_vector)
            .map_err(|e| self.rejected(e))
    }

    pub fn get_scene_weather(
        &self,
        scene: impl SceneKey,
    ) -> Result<(WeatherKind, SpatialParam), WeatherError> {
        let scene = self.resolve(scene)?;
        self.sequencer.scene_weather(scene).map_err(|e| self.rejected(e))
    }

    pub fn get_scene_status(&self, scene: impl SceneKey) -> Result<SceneStatus, WeatherError> {
        let scene = self.resolve(scene)?;
        self.sequencer.scene_status(scene).map_err(|e| self.rejected(e))
    }

    pub fn subscribe(&self) -> WeatherSubscription {
        self.sequencer.subscribe()
    }

    pub fn scenes(&self) -> Vec<SceneId> {
        self.sequencer.scenes()
    }

    fn resolve(&self, scene: impl SceneKey) -> Result<SceneId, WeatherError> {
        scene.resolve().map_err(|e| self.rejected(e))
    }

    fn rejected(&self, err: SceneError) -> WeatherError {
        log::warn!("weather request rejected: {err}");
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{stream::WeatherBroadcaster, weather::presets};
    use tokio::runtime::Handle;

    fn service(scenes: &[SceneId]) -> WeatherService {
        let sequencer = Sequencer::new(
            Handle::current(),
            scenes.iter().copied(),
            WeatherBroadcaster::new(16),
        );
        WeatherService::new(sequencer)
    }

    #[tokio::test]
    async fn numeric_and_named_ids_reach_the_same_scene() {
        let svc = service(&SceneId::ALL);
        svc.set_scene_weather(1u32, WeatherKind::Cloudy, SpatialParam::X)
            .unwrap();
        assert_eq!(
            svc.get_scene_weather("corellia").unwrap(),
            (WeatherKind::Cloudy, SpatialParam::X)
        );
        assert_eq!(
            svc.get_scene_weather(SceneId::Corellia).unwrap().0,
            WeatherKind::Cloudy
        );
    }

    #[tokio::test]
    async fn bad_scene_ids_are_unknown_scene() {
        let svc = service(&SceneId::ALL);
        let mut sub = svc.subscribe();

        let err = svc
            .run_weather_sequence(42u32, presets::light_storm().unwrap())
            .unwrap_err();
        assert_eq!(err, WeatherError::Scene(SceneError::UnknownScene("42".to_string())));
        assert!(svc
            .set_scene_weather("hoth", WeatherKind::Cloudy, SpatialParam::ZERO)
            .unwrap_err()
            .is_unknown_scene());
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn scene_outside_served_set_is_unknown() {
        let svc = service(&[SceneId::Naboo]);
        let err = svc.get_scene_status(SceneId::Endor).unwrap_err();
        assert!(err.is_unknown_scene());
        assert_eq!(svc.scenes(), vec![SceneId::Naboo]);
    }

    #[tokio::test]
    async fn non_finite_vector_is_rejected_before_dispatch() {
        let svc = service(&SceneId::ALL);
        let bad = SpatialParam::new(f32::NAN, 0.0, 0.0);
        let err = svc
            .set_scene_weather(SceneId::Lok, WeatherKind::HeavyStorm, bad)
            .unwrap_err();
        assert!(matches!(err, WeatherError::Data(WeatherDataError::NonFiniteParam(_))));
        assert_eq!(svc.get_scene_status(SceneId::Lok).unwrap().epoch, 0);
    }

    #[tokio::test]
    async fn run_sequence_publishes_first_phase() {
        let svc = service(&SceneId::ALL);
        let mut sub = svc.subscribe().for_scene(SceneId::Tatooine);
        let name = String::from("Tatooine");
        svc.run_weather_sequence(&*name, presets::medium_storm().unwrap())
            .unwrap();
        let update = sub.try_recv().unwrap();
        assert_eq!(update.kind, WeatherKind::Cloudy);
        assert!(svc.get_scene_status(9u32).unwrap().running);
    }
}
