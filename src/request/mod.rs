//! User-supplied trip fields and their per-category bindings.

mod binding;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

pub use binding::Binding;

/// One input control of the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    DepartureCity,
    DestinationCity,
    BudgetAmount,
    TravelDays,
    InterestType,
    PlannedActivities,
    TravelDates,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::DepartureCity,
        Field::DestinationCity,
        Field::BudgetAmount,
        Field::TravelDays,
        Field::InterestType,
        Field::PlannedActivities,
        Field::TravelDates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::DepartureCity => "Departure City",
            Field::DestinationCity => "Destination City",
            Field::BudgetAmount => "Budget Amount",
            Field::TravelDays => "Number of Days",
            Field::InterestType => "Interest Type",
            Field::PlannedActivities => "Planned Activities",
            Field::TravelDates => "Travel Dates",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Interest {
    Adventure,
    Relaxation,
    Sightseeing,
    FoodAndDrinks,
}

impl Interest {
    pub const ALL: [Interest; 4] = [
        Interest::Adventure,
        Interest::Relaxation,
        Interest::Sightseeing,
        Interest::FoodAndDrinks,
    ];
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Interest::Adventure => "Adventure",
            Interest::Relaxation => "Relaxation",
            Interest::Sightseeing => "Sightseeing",
            Interest::FoodAndDrinks => "Food & Drinks",
        };
        write!(f, "{label}")
    }
}

/// Read access to submitted field values.
///
/// `None` means the user never supplied the field. An empty string or zero is
/// still a value.
pub trait FieldSource {
    fn value(&self, field: Field) -> Option<String>;
}

/// One form submission. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    pub departure_city: Option<String>,
    pub destination_city: Option<String>,
    pub budget_amount: Option<u64>,
    pub travel_days: Option<u32>,
    pub interest_type: Option<Interest>,
    pub planned_activities: Option<String>,
    pub travel_dates: Option<String>,
}

impl TripRequest {
    pub fn supplied_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_some())
            .collect()
    }
}

impl FieldSource for TripRequest {
    fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::DepartureCity => self.departure_city.clone(),
            Field::DestinationCity => self.destination_city.clone(),
            Field::BudgetAmount => self.budget_amount.map(|amount| amount.to_string()),
            Field::TravelDays => self.travel_days.map(|days| days.to_string()),
            Field::InterestType => self.interest_type.map(|interest| interest.to_string()),
            Field::PlannedActivities => self.planned_activities.clone(),
            Field::TravelDates => self.travel_dates.clone(),
        }
    }
}
