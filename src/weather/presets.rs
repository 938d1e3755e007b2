/// `weather/presets.rs` - stock storm lifecycles
///
/// Durations are short (seconds) so a storm is easy to watch from a console;
/// live deployments pass their own sequences with realistic lengths.
use super::{
    error::WeatherDataError,
    sequence::{WeatherEvent, WeatherSequence},
    types::{SpatialParam, WeatherKind},
};

fn phases(steps: &[(f32, WeatherKind)]) -> Result<WeatherSequence, WeatherDataError> {
    let events = steps
        .iter()
        .map(|&(secs, kind)| WeatherEvent::new(secs, kind, SpatialParam::ZERO))
        .collect::<Result<Vec<_>, _>>()?;
    WeatherSequence::new(events)
}

/// Cloudy 5s, light storm 20s, cloudy 5s, then clear skies for good.
pub fn light_storm() -> Result<WeatherSequence, WeatherDataError> {
    phases(&[
        (5.0, WeatherKind::Cloudy),
        (20.0, WeatherKind::LightStorm),
        (5.0, WeatherKind::Cloudy),
        (0.0, WeatherKind::NoStorm),
    ])
}

/// Builds up through a light storm to a 20s medium storm and back down.
pub fn medium_storm() -> Result<WeatherSequence, WeatherDataError> {
    phases(&[
        (5.0, WeatherKind::Cloudy),
        (10.0, WeatherKind::LightStorm),
        (20.0, WeatherKind::MediumStorm),
        (10.0, WeatherKind::LightStorm),
        (5.0, WeatherKind::Cloudy),
        (0.0, WeatherKind::NoStorm),
    ])
}

pub fn all() -> Result<Vec<WeatherSequence>, WeatherDataError> {
    Ok(vec![light_storm()?, medium_storm()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn light_storm_runs_thirty_seconds_and_clears() {
        let seq = light_storm().unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.total_duration(), Duration::from_secs(30));
        assert_eq!(seq.last().kind(), WeatherKind::NoStorm);
        assert!(seq.last().is_hold());
    }

    #[test]
    fn medium_storm_peaks_in_the_middle() {
        let seq = medium_storm().unwrap();
        let kinds: Vec<_> = seq.events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds[2], WeatherKind::MediumStorm);
        assert_eq!(seq.total_duration(), Duration::from_secs(50));
    }

    #[test]
    fn only_the_last_phase_holds() {
        for seq in all().unwrap() {
            let holds = seq.events().iter().filter(|e| e.is_hold()).count();
            assert_eq!(holds, 1);
            assert!(seq.last().is_hold());
        }
    }
}
