use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDateTime, Timelike, Utc};
use chrono_tz::Asia::Seoul;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::{
    error::{Result, WeatherError},
    model::{GridCell, Observation},
};

use super::{ForecastSource, http_client, truncate_body};

const ULTRA_SHORT_FORECAST_PATH: &str = "/1360000/VilageFcstInfoService_2.0/getUltraSrtFcst";
const NUM_OF_ROWS: &str = "60";
const RESULT_OK: &str = "00";

/// KMA ultra-short-range forecast (`getUltraSrtFcst`) client.
#[derive(Debug, Clone)]
pub struct KmaForecastClient {
    service_key: String,
    base_url: String,
    http: Client,
}

/// `base_date`/`base_time` pair identifying one forecast issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTime {
    pub date: String,
    pub time: String,
}

impl BaseTime {
    /// Latest issuance for a Korea-local wall clock time.
    ///
    /// The upstream publishes each hour's forecast around half past, so before
    /// minute 30 the previous hour is requested instead.
    pub fn for_local(now: NaiveDateTime) -> Self {
        let issued = if now.minute() < 30 {
            now - ChronoDuration::hours(1)
        } else {
            now
        };

        Self {
            date: issued.format("%Y%m%d").to_string(),
            time: format!("{:02}00", issued.hour()),
        }
    }

    pub fn now() -> Self {
        Self::for_local(Utc::now().with_timezone(&Seoul).naive_local())
    }
}

impl KmaForecastClient {
    pub fn with_base_url(service_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            service_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client(timeout)?,
        })
    }

    /// Fetch the forecast issued at `base` for `cell`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_at(&self, cell: GridCell, base: &BaseTime) -> Result<Vec<Observation>> {
        let url = format!("{}{}", self.base_url, ULTRA_SHORT_FORECAST_PATH);
        let nx = cell.x.to_string();
        let ny = cell.y.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("numOfRows", NUM_OF_ROWS),
                ("pageNo", "1"),
                ("base_date", base.date.as_str()),
                ("base_time", base.time.as_str()),
                ("nx", nx.as_str()),
                ("ny", ny.as_str()),
                ("dataType", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::forecast_source(format!("error sending request: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::forecast_source(format!("error reading response body: {e}"))
        })?;

        tracing::debug!(%status, body = %body, "forecast response");

        if !status.is_success() {
            return Err(WeatherError::forecast_source(format!(
                "forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        parse_forecast(&body)
    }
}

/// Decode a forecast body down to its observation list.
pub fn parse_forecast(body: &str) -> Result<Vec<Observation>> {
    let parsed: KmaEnvelope = serde_json::from_str(body).map_err(|e| {
        WeatherError::forecast_source(format!("error unmarshalling response JSON: {e}"))
    })?;

    let response = parsed.response;
    if response.header.result_code != RESULT_OK {
        return Err(WeatherError::forecast_source(format!(
            "forecast API error {}: {}",
            response.header.result_code, response.header.result_msg
        )));
    }

    let items = response
        .body
        .and_then(|b| b.items)
        .map(|i| i.item)
        .ok_or_else(|| WeatherError::forecast_source("forecast response has no items"))?;

    if items.is_empty() {
        return Err(WeatherError::forecast_source("no weather data found"));
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct KmaEnvelope {
    response: KmaResponse,
}

#[derive(Debug, Deserialize)]
struct KmaResponse {
    header: KmaHeader,
    body: Option<KmaBody>,
}

#[derive(Debug, Deserialize)]
struct KmaHeader {
    #[serde(rename = "resultCode")]
    result_code: String,
    #[serde(rename = "resultMsg", default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct KmaBody {
    items: Option<KmaItems>,
}

#[derive(Debug, Deserialize)]
struct KmaItems {
    #[serde(default)]
    item: Vec<Observation>,
}

#[async_trait]
impl ForecastSource for KmaForecastClient {
    async fn fetch(&self, cell: GridCell) -> Result<Vec<Observation>> {
        self.fetch_at(cell, &BaseTime::now()).await
    }
}
