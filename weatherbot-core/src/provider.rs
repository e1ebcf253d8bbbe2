use crate::{
    ApiKeys, Config,
    error::{Result, WeatherError},
    model::{Coordinate, GridCell, Observation},
    provider::{kakao::KakaoLocalClient, kma::KmaForecastClient},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod kakao;
pub mod kma;

/// Turns a free-text place name into coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, location: &str) -> Result<Coordinate>;
}

/// Fetches the current ultra-short-range forecast for one grid cell.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, cell: GridCell) -> Result<Vec<Observation>>;
}

/// Construct the Kakao geocoder from config and its injected key.
pub fn resolver_from_config(config: &Config, keys: &ApiKeys) -> Result<Box<dyn LocationResolver>> {
    let client = KakaoLocalClient::with_base_url(
        keys.kakao.clone(),
        &config.kakao_base_url,
        config.request_timeout(),
    )?;
    Ok(Box::new(client))
}

/// Construct the KMA forecast client from config and its injected key.
pub fn source_from_config(config: &Config, keys: &ApiKeys) -> Result<Box<dyn ForecastSource>> {
    let client = KmaForecastClient::with_base_url(
        keys.weather.clone(),
        &config.kma_base_url,
        config.request_timeout(),
    )?;
    Ok(Box::new(client))
}

fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
