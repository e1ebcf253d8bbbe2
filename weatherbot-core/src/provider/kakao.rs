use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::{
    error::{Result, WeatherError},
    model::Coordinate,
};

use super::{LocationResolver, http_client, truncate_body};

const KEYWORD_SEARCH_PATH: &str = "/v2/local/search/keyword";

/// Kakao Local keyword search, used as a geocoder.
#[derive(Debug, Clone)]
pub struct KakaoLocalClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl KakaoLocalClient {
    pub fn with_base_url(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client(timeout)?,
        })
    }

    #[instrument(skip(self), level = "info")]
    async fn search_keyword(&self, query: &str) -> Result<KakaoSearchResponse> {
        let url = format!("{}{}", self.base_url, KEYWORD_SEARCH_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[("query", query), ("size", "1")])
            .header("Authorization", self.api_key.as_str())
            .send()
            .await
            .map_err(|e| WeatherError::resolver(format!("Error sending request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::resolver(format!("Error reading response: {e}")))?;

        tracing::debug!(%status, body = %body, "keyword search response");

        if !status.is_success() {
            return Err(WeatherError::resolver(format!(
                "Location search failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::resolver(format!("Error unmarshalling JSON: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct KakaoSearchResponse {
    documents: Vec<KakaoDocument>,
}

#[derive(Debug, Deserialize)]
struct KakaoDocument {
    #[serde(default)]
    place_name: String,
    #[serde(default)]
    address_name: String,
    x: String,
    y: String,
}

#[async_trait]
impl LocationResolver for KakaoLocalClient {
    async fn resolve(&self, location: &str) -> Result<Coordinate> {
        let parsed = self.search_keyword(location).await?;

        let doc = parsed
            .documents
            .first()
            .ok_or_else(|| WeatherError::resolver("There is no data"))?;

        tracing::info!(
            place = %doc.place_name,
            address = %doc.address_name,
            x = %doc.x,
            y = %doc.y,
            "resolved location"
        );

        Coordinate::parse(&doc.x, &doc.y)
    }
}
