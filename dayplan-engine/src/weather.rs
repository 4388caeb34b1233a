use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Normalized, immutable weather reading for one city at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub provider: String,
    pub city: String,
    pub temp_c: f64,
    pub wind_mps: f64,
    pub condition: String,
    pub is_rainy: bool,
}

/// Trait for fetching a normalized snapshot for a city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot>;
}

/// OpenWeatherMap current-weather client
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmWeatherResponse {
    name: String,
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    id: u32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| EngineError::WeatherUpstream {
                status: None,
                message: format!("openweather request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::WeatherUpstream {
                status: Some(status.as_u16()),
                message: format!("openweather returned {status}: {body}"),
            });
        }

        let payload: OwmWeatherResponse =
            response
                .json()
                .await
                .map_err(|e| EngineError::WeatherUpstream {
                    status: None,
                    message: format!("failed to parse openweather response: {e}"),
                })?;

        Ok(snapshot_from_owm(city, payload))
    }
}

fn snapshot_from_owm(requested_city: &str, payload: OwmWeatherResponse) -> WeatherSnapshot {
    let condition = payload.weather.first();
    let is_rainy = condition.map(|c| is_precipitation(c.id)).unwrap_or(false);
    let label = condition
        .map(|c| c.description.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let city = if payload.name.trim().is_empty() {
        requested_city.to_string()
    } else {
        payload.name
    };

    WeatherSnapshot {
        provider: "openweather".to_string(),
        city,
        temp_c: payload.main.temp,
        wind_mps: payload.wind.speed,
        condition: label,
        is_rainy,
    }
}

// OWM condition ids: 2xx thunderstorm, 3xx drizzle, 5xx rain, 6xx snow.
// Everything from 700 up (atmosphere, clear, clouds) is dry.
fn is_precipitation(condition_id: u32) -> bool {
    (200..700).contains(&condition_id)
}
