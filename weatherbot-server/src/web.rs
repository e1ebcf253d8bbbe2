//! Skill webhook HTTP endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use weatherbot_core::{SkillRequest, SkillResponse, WeatherError, WeatherService};

use crate::samples;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

/// Create the HTTP router
pub fn create_router(service: Arc<WeatherService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health_check))
        .route("/weather", post(weather))
        .route("/simpletext", post(samples::simple_text))
        .route("/simpleimage", post(samples::simple_image))
        .route("/basiccard", post(samples::basic_card))
        .route("/commercecard", post(samples::commerce_card))
        .route("/contextcontrol", post(samples::context_control))
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C.
pub async fn serve(bind: &str, service: Arc<WeatherService>) -> anyhow::Result<()> {
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down gracefully...");
}

/// GET /health
async fn health_check() -> &'static str {
    "ok"
}

/// POST /weather - forecast for `action.params.location`
async fn weather(
    State(state): State<AppState>,
    payload: Result<Json<SkillRequest>, JsonRejection>,
) -> (StatusCode, Json<SkillResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected skill request body: {}", rejection.body_text());
            return failure(&WeatherError::RequestParse);
        }
    };

    let location = request.action.params.location;
    tracing::info!(%location, "weather request");

    match state.service.forecast_for(&location).await {
        Ok(report) => (StatusCode::OK, Json(SkillResponse::simple_text(report))),
        Err(e) => {
            if e.is_client_error() {
                tracing::info!(%location, "bad weather request: {}", e);
            } else {
                tracing::warn!(%location, "weather lookup failed: {}", e);
            }
            failure(&e)
        }
    }
}

fn failure(err: &WeatherError) -> (StatusCode, Json<SkillResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(SkillResponse::simple_text(err.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use weatherbot_core::{
        Coordinate, ForecastSource, GridCell, LocationResolver, Observation, error::Result,
    };

    const FORECAST_DOWN: &str = "forecast API error 03: NO_DATA";

    #[derive(Debug)]
    struct StubResolver;

    #[async_trait]
    impl LocationResolver for StubResolver {
        async fn resolve(&self, location: &str) -> Result<Coordinate> {
            match location {
                "기준점" => Ok(Coordinate::new(126.0, 38.0)),
                "부산" => Ok(Coordinate::new(129.0756, 35.1796)),
                "이상한곳" => Err(WeatherError::CoordinateParse {
                    axis: "longitude",
                    value: "?".into(),
                }),
                _ => Err(WeatherError::resolver("There is no data")),
            }
        }
    }

    /// Serves a fixed slot for the reference cell and fails for every other cell.
    #[derive(Debug)]
    struct StubSource;

    #[async_trait]
    impl ForecastSource for StubSource {
        async fn fetch(&self, cell: GridCell) -> Result<Vec<Observation>> {
            if cell != (GridCell { x: 42, y: 135 }) {
                return Err(WeatherError::forecast_source(FORECAST_DOWN));
            }
            Ok(vec![
                Observation::new("0600", "T1H", "5"),
                Observation::new("0600", "SKY", "1"),
                Observation::new("0600", "PTY", "0"),
                Observation::new("0600", "REH", "40"),
                Observation::new("0600", "RN1", "강수없음"),
                Observation::new("0600", "WSD", "2.1"),
            ])
        }
    }

    async fn spawn_app() -> String {
        let service = WeatherService::new(Box::new(StubResolver), Box::new(StubSource));
        let app = create_router(Arc::new(service));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn post_json(url: &str, body: Value) -> (u16, Value) {
        let res = reqwest::Client::new()
            .post(url)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        (status, res.json().await.unwrap())
    }

    async fn ask_weather(base: &str, body: Value) -> (u16, Value) {
        post_json(&format!("{base}/weather"), body).await
    }

    fn location(name: &str) -> Value {
        json!({"action": {"params": {"location": name}}})
    }

    fn text_of(body: &Value) -> &str {
        body["template"]["outputs"][0]["simpleText"]["text"]
            .as_str()
            .unwrap()
    }

    #[tokio::test]
    async fn weather_returns_forecast_text() {
        let base = spawn_app().await;

        let (status, body) = ask_weather(&base, location("기준점")).await;

        assert_eq!(status, 200);
        assert_eq!(body["version"], "2.0");
        assert_eq!(
            text_of(&body),
            "06:00 날씨\n하늘상태: ☀️ 맑음\n강수형태: ☀️ 맑음\n기온: 5℃\n습도: 40%\n강수량: 강수없음\n풍속: 2.1m/s"
        );
    }

    #[tokio::test]
    async fn unknown_location_is_400_with_message() {
        let base = spawn_app().await;

        let (status, body) = ask_weather(&base, location("없는곳")).await;

        assert_eq!(status, 400);
        assert_eq!(text_of(&body), "There is no data");
    }

    #[tokio::test]
    async fn coordinate_errors_are_400() {
        let base = spawn_app().await;

        let (status, body) = ask_weather(&base, location("이상한곳")).await;

        assert_eq!(status, 400);
        assert!(text_of(&body).contains("longitude"));
    }

    #[tokio::test]
    async fn forecast_failure_is_400_with_upstream_message() {
        let base = spawn_app().await;

        let (status, body) = ask_weather(&base, location("부산")).await;

        assert_eq!(status, 400);
        assert_eq!(body["version"], "2.0");
        assert_eq!(text_of(&body), FORECAST_DOWN);
    }

    #[tokio::test]
    async fn malformed_body_gets_fixed_message() {
        let base = spawn_app().await;

        let res = reqwest::Client::new()
            .post(format!("{base}/weather"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: Value = res.json().await.unwrap();
        assert_eq!(text_of(&body), "파라미터를 읽는 데 실패했습니다.");
    }

    #[tokio::test]
    async fn missing_location_gets_fixed_message() {
        let base = spawn_app().await;

        let (status, body) = ask_weather(&base, json!({"action": {}})).await;

        assert_eq!(status, 400);
        assert_eq!(text_of(&body), "파라미터를 읽는 데 실패했습니다.");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let base = spawn_app().await;
        let res = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(res.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn sample_endpoints_answer() {
        let base = spawn_app().await;

        let (status, body) = post_json(&format!("{base}/simpletext"), json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(text_of(&body), "간단한 텍스트 요소입니다.");

        let (status, body) = post_json(&format!("{base}/contextcontrol"), json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(body["context"]["values"].as_array().unwrap().len(), 3);
        assert!(body.get("template").is_none());

        let (_, body) = post_json(&format!("{base}/commercecard"), json!({})).await;
        let card = &body["template"]["outputs"][0]["basicCard"];
        assert_eq!(card["title"], "보물상자");

        let (_, body) = post_json(&format!("{base}/basiccard"), json!({})).await;
        let buttons = body["template"]["outputs"][0]["textCard"]["buttons"].as_array();
        assert_eq!(buttons.map(Vec::len), Some(2));

        let (_, body) = post_json(&format!("{base}/simpleimage"), json!({})).await;
        let image = &body["template"]["outputs"][0]["simpleImage"];
        assert_eq!(image["altText"], "보물상자입니다");
    }
}
