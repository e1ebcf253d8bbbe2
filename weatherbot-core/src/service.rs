use tracing::instrument;

use crate::{
    ApiKeys, Config,
    error::{Result, WeatherError},
    forecast,
    grid::project,
    provider::{ForecastSource, LocationResolver, resolver_from_config, source_from_config},
};

/// Location name in, forecast text out.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug)]
pub struct WeatherService {
    resolver: Box<dyn LocationResolver>,
    source: Box<dyn ForecastSource>,
}

impl WeatherService {
    pub fn new(resolver: Box<dyn LocationResolver>, source: Box<dyn ForecastSource>) -> Self {
        Self { resolver, source }
    }

    /// Wire up the Kakao geocoder and KMA forecast clients.
    pub fn from_config(config: &Config, keys: &ApiKeys) -> Result<Self> {
        Ok(Self::new(
            resolver_from_config(config, keys)?,
            source_from_config(config, keys)?,
        ))
    }

    #[instrument(skip(self), level = "info")]
    pub async fn forecast_for(&self, location: &str) -> Result<String> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::RequestParse);
        }

        let coord = self.resolver.resolve(location).await?;
        let cell = project(coord.longitude, coord.latitude);
        tracing::info!(?coord, ?cell, "projected location onto forecast grid");

        let observations = self.source.fetch(cell).await?;
        forecast::aggregate(&observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, GridCell, Observation};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct FixedResolver(Option<Coordinate>);

    #[async_trait]
    impl LocationResolver for FixedResolver {
        async fn resolve(&self, _location: &str) -> Result<Coordinate> {
            self.0.ok_or_else(|| WeatherError::resolver("There is no data"))
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSource {
        seen: Arc<Mutex<Vec<GridCell>>>,
        observations: Vec<Observation>,
    }

    #[async_trait]
    impl ForecastSource for RecordingSource {
        async fn fetch(&self, cell: GridCell) -> Result<Vec<Observation>> {
            self.seen.lock().unwrap().push(cell);
            Ok(self.observations.clone())
        }
    }

    #[tokio::test]
    async fn pipeline_projects_and_formats() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let source = RecordingSource {
            seen: Arc::clone(&seen),
            observations: vec![
                Observation::new("0600", "T1H", "5"),
                Observation::new("0600", "SKY", "1"),
            ],
        };
        let svc = WeatherService::new(
            Box::new(FixedResolver(Some(Coordinate::new(126.0, 38.0)))),
            Box::new(source),
        );

        let text = svc.forecast_for("reference").await.unwrap();
        assert!(text.starts_with("06:00 날씨\n하늘상태: ☀️ 맑음"));
        assert!(text.contains("기온: 5℃"));
        assert_eq!(*seen.lock().unwrap(), vec![GridCell { x: 42, y: 135 }]);
    }

    #[tokio::test]
    async fn resolver_failure_short_circuits() {
        let svc = WeatherService::new(
            Box::new(FixedResolver(None)),
            Box::new(RecordingSource::default()),
        );

        let err = svc.forecast_for("nowhere").await.unwrap_err();
        assert_eq!(err.to_string(), "There is no data");
    }

    #[tokio::test]
    async fn blank_location_is_rejected_before_lookup() {
        let svc = WeatherService::new(
            Box::new(FixedResolver(Some(Coordinate::new(126.0, 38.0)))),
            Box::new(RecordingSource::default()),
        );

        let err = svc.forecast_for("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::RequestParse));
    }

    #[tokio::test]
    async fn empty_source_result_is_empty_forecast() {
        let svc = WeatherService::new(
            Box::new(FixedResolver(Some(Coordinate::new(126.0, 38.0)))),
            Box::new(RecordingSource::default()),
        );

        let err = svc.forecast_for("reference").await.unwrap_err();
        assert!(matches!(err, WeatherError::EmptyForecast));
    }

    #[test]
    fn from_config_builds_real_clients() {
        let keys = ApiKeys {
            kakao: "KakaoAK k".into(),
            weather: "w".into(),
        };
        assert!(WeatherService::from_config(&Config::default(), &keys).is_ok());
    }
}
