use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Coordinates, DailySeries, DateRange, WeatherBackend};
use crate::config::ServiceSettings;
use crate::error::PlanError;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Open-Meteo geocoding and forecast endpoints. Neither needs an API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new(services: &ServiceSettings, timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("Failed to build Open-Meteo HTTP client")?;

        Ok(Self {
            http,
            geocoding_url: services.geocoding_url.clone(),
            forecast_url: services.forecast_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, PlanError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| PlanError::ForecastUnavailable(format!("{what} request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlanError::ForecastUnavailable(format!(
                "{what} service returned status {status}"
            )));
        }

        response.json::<T>().await.map_err(|err| {
            PlanError::ForecastUnavailable(format!("failed to parse {what} response: {err}"))
        })
    }
}

#[async_trait]
impl WeatherBackend for OpenMeteoClient {
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, PlanError> {
        let query = [("name", city.to_string()), ("count", "1".to_string())];
        let response: GeocodingResponse = self.get_json(&self.geocoding_url, &query, "geocoding").await?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|place| {
                debug!(name = %place.name, country = ?place.country, "geocoding candidate");
                Coordinates {
                    latitude: place.latitude,
                    longitude: place.longitude,
                }
            }))
    }

    async fn daily(&self, at: Coordinates, range: &DateRange) -> Result<DailySeries, PlanError> {
        let query = [
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("start_date", range.start.format("%Y-%m-%d").to_string()),
            ("end_date", range.end.format("%Y-%m-%d").to_string()),
            ("timezone", "auto".to_string()),
        ];
        let response: ForecastResponse = self.get_json(&self.forecast_url, &query, "forecast").await?;

        let daily = response
            .daily
            .ok_or_else(|| PlanError::ForecastUnavailable("response has no daily data".into()))?;

        Ok(DailySeries {
            time: daily.time,
            temperature_max: daily.temperature_max,
            temperature_min: daily.temperature_min,
            weather_code: daily.weather_code.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<Option<f64>>,
    #[serde(rename = "weathercode")]
    weather_code: Option<Vec<Option<u16>>>,
}
