//! Deterministic weather forecast for the `weather` category.
//!
//! [`ForecastClient`] validates the date range, resolves the city through a
//! [`WeatherBackend`] and renders the daily series as a markdown table. The
//! dispatcher only sees the [`ForecastProvider`] seam.

mod conditions;
mod openmeteo;
mod table;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::error::PlanError;

pub use openmeteo::OpenMeteoClient;
pub use table::{DailyEntry, DailySeries, ForecastRecord};

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Markdown forecast table for `city` over `date_range` ("YYYY-MM-DD to YYYY-MM-DD").
    async fn forecast(&self, city: &str, date_range: &str) -> Result<String, PlanError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Network half of the forecast: place lookup and the daily series.
#[async_trait]
pub trait WeatherBackend: Send + Sync {
    /// First geocoding candidate for `city`, if any.
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, PlanError>;

    async fn daily(&self, at: Coordinates, range: &DateRange) -> Result<DailySeries, PlanError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        let invalid = || PlanError::InvalidDateRange(raw.to_string());

        let parts: Vec<&str> = raw.split("to").map(str::trim).collect();
        let [start, end] = parts.as_slice() else {
            return Err(invalid());
        };
        if start.is_empty() || end.is_empty() {
            return Err(invalid());
        }

        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
        if end < start {
            return Err(invalid());
        }

        Ok(Self { start, end })
    }
}

pub struct ForecastClient<B> {
    backend: B,
}

impl<B: WeatherBackend> ForecastClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn record(&self, city: &str, date_range: &str) -> Result<ForecastRecord, PlanError> {
        let range = DateRange::parse(date_range)?;

        let coordinates = self
            .backend
            .geocode(city)
            .await?
            .ok_or_else(|| PlanError::CityNotFound(city.to_string()))?;
        debug!(city, lat = coordinates.latitude, lon = coordinates.longitude, "geocoded city");

        let series = self.backend.daily(coordinates, &range).await?;
        ForecastRecord::from_series(city, &series)
    }
}

#[async_trait]
impl<B: WeatherBackend> ForecastProvider for ForecastClient<B> {
    async fn forecast(&self, city: &str, date_range: &str) -> Result<String, PlanError> {
        let record = self.record(city, date_range).await?;
        debug!(city = %record.city, days = record.days.len(), "forecast ready");
        Ok(record.to_markdown())
    }
}
