//! Error types for the planning pipeline.

use thiserror::Error;

use crate::catalogue::Category;
use crate::request::Field;

/// Shown in place of a category whose reasoning backend produced nothing.
pub const NO_OUTPUT_PLACEHOLDER: &str = "Error: No output received.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Template '{category}' requires parameter '{parameter}'")]
    MissingParameter {
        category: Category,
        parameter: String,
    },

    #[error("Template '{category}' has unbound placeholder '{{{placeholder}}}'")]
    UnboundPlaceholder {
        category: Category,
        placeholder: String,
    },

    #[error("Missing required field: {0}")]
    IncompleteRequest(Field),

    #[error("Invalid date range '{0}', expected 'YYYY-MM-DD to YYYY-MM-DD'")]
    InvalidDateRange(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("Reasoning backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl PlanError {
    /// Template and catalogue errors are programmer errors rather than user errors.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            PlanError::UnknownCategory(_)
                | PlanError::MissingParameter { .. }
                | PlanError::UnboundPlaceholder { .. }
        )
    }

    /// Text shown in place of a category's result.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlanError::BackendUnavailable(_) => NO_OUTPUT_PLACEHOLDER.to_string(),
            PlanError::InvalidDateRange(_)
            | PlanError::CityNotFound(_)
            | PlanError::ForecastUnavailable(_) => format!("❌ Error fetching weather: {self}"),
            PlanError::IncompleteRequest(_) => format!("⚠️ {self}"),
            _ => format!("❌ {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failure_uses_literal_placeholder() {
        let err = PlanError::BackendUnavailable("timed out".into());
        assert_eq!(err.user_message(), "Error: No output received.");
    }

    #[test]
    fn forecast_failures_share_weather_prefix() {
        let err = PlanError::CityNotFound("Atlantis".into());
        assert_eq!(
            err.user_message(),
            "❌ Error fetching weather: City not found: Atlantis"
        );

        let err = PlanError::InvalidDateRange("tomorrow".into());
        assert!(err.user_message().starts_with("❌ Error fetching weather: "));
    }

    #[test]
    fn incomplete_request_names_field_label() {
        let err = PlanError::IncompleteRequest(Field::DestinationCity);
        assert_eq!(
            err.user_message(),
            "⚠️ Missing required field: Destination City"
        );
    }

    #[test]
    fn unbound_placeholder_message_shows_braces() {
        let err = PlanError::UnboundPlaceholder {
            category: Category::Itinerary,
            placeholder: "season".into(),
        };
        assert_eq!(
            err.to_string(),
            "Template 'itinerary' has unbound placeholder '{season}'"
        );
        assert!(err.is_misconfiguration());
    }
}
