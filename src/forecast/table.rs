use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use super::conditions;
use crate::error::PlanError;

/// Degrees added to the daily low to approximate the evening temperature.
pub const EVENING_OFFSET_CELSIUS: f64 = 2.0;

const HEADER: &str = "| Date | Morning Temp | Afternoon Temp | Evening Temp | Conditions |";
const DIVIDER: &str = "|------|---------------|-----------------|----------------|-------------|";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub condition: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub city: String,
    pub days: Vec<DailyEntry>,
}

/// Column-oriented daily values as the forecast endpoint returns them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub weather_code: Vec<Option<u16>>,
}

impl ForecastRecord {
    /// Zips the daily columns into rows. A short column or a missing
    /// temperature makes the whole forecast unavailable.
    pub fn from_series(city: &str, series: &DailySeries) -> Result<Self, PlanError> {
        let mut days = Vec::with_capacity(series.time.len());

        for (index, raw_date) in series.time.iter().enumerate() {
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|err| {
                PlanError::ForecastUnavailable(format!("invalid date '{raw_date}': {err}"))
            })?;
            let low = column_value(&series.temperature_min, index, "temperature_2m_min", raw_date)?;
            let high = column_value(&series.temperature_max, index, "temperature_2m_max", raw_date)?;
            let condition = series
                .weather_code
                .get(index)
                .copied()
                .flatten()
                .map_or("Unknown", conditions::describe);

            days.push(DailyEntry {
                date,
                morning: low,
                afternoon: high,
                evening: low + EVENING_OFFSET_CELSIUS,
                condition,
            });
        }

        Ok(Self {
            city: city.to_string(),
            days,
        })
    }

    pub fn to_markdown(&self) -> String {
        let mut table = String::new();
        let _ = writeln!(table, "{HEADER}");
        let _ = writeln!(table, "{DIVIDER}");
        for day in &self.days {
            let _ = writeln!(
                table,
                "| {} | {:.1}°C | {:.1}°C | {:.1}°C | {} |",
                day.date.format("%Y-%m-%d"),
                day.morning,
                day.afternoon,
                day.evening,
                day.condition
            );
        }
        table
    }
}

fn column_value(
    column: &[Option<f64>],
    index: usize,
    name: &str,
    date: &str,
) -> Result<f64, PlanError> {
    column.get(index).copied().flatten().ok_or_else(|| {
        PlanError::ForecastUnavailable(format!("missing {name} for {date}"))
    })
}
