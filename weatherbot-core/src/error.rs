//! Error types surfaced to chat users.
//!
//! Every variant's `Display` output is the text that ends up in the
//! `simpleText` bubble, so messages are written for end users.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// The inbound webhook body could not be decoded.
    #[error("파라미터를 읽는 데 실패했습니다.")]
    RequestParse,

    /// Geocoding failed or matched nothing.
    #[error("{0}")]
    Resolver(String),

    /// The geocoder returned coordinates that are not numbers.
    #[error("error parsing {axis}: {value:?}")]
    CoordinateParse { axis: &'static str, value: String },

    /// The forecast API failed or returned an unusable body.
    #[error("{0}")]
    ForecastSource(String),

    /// Aggregation was asked to format zero observations.
    #[error("no weather data found")]
    EmptyForecast,

    #[error("configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    pub fn forecast_source(msg: impl Into<String>) -> Self {
        Self::ForecastSource(msg.into())
    }

    /// Whether the failure originated in the inbound request rather than upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::RequestParse)
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
