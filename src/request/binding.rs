use tracing::debug;

use crate::catalogue::{Category, Params};
use crate::error::PlanError;

use super::{Field, FieldSource};

/// Which request fields a category consumes, and the template parameter each
/// one is passed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub category: Category,
    pub fields: &'static [(Field, &'static str)],
}

const DEPARTURE: (Field, &str) = (Field::DepartureCity, "departure_city");
const DESTINATION: (Field, &str) = (Field::DestinationCity, "destination_city");
const BUDGET: (Field, &str) = (Field::BudgetAmount, "budget_amount");
const DAYS: (Field, &str) = (Field::TravelDays, "travel_days");
const INTEREST: (Field, &str) = (Field::InterestType, "interest_type");
const ACTIVITIES: (Field, &str) = (Field::PlannedActivities, "planned_activities");
const DATES: (Field, &str) = (Field::TravelDates, "travel_dates");

static BINDINGS: [Binding; 9] = [
    Binding {
        category: Category::DistanceTrain,
        fields: &[DEPARTURE, DESTINATION, BUDGET],
    },
    Binding {
        category: Category::FlightInfo,
        fields: &[DEPARTURE, DESTINATION, BUDGET],
    },
    Binding {
        category: Category::HotelsFoodPlaces,
        fields: &[DESTINATION, BUDGET],
    },
    Binding {
        category: Category::Itinerary,
        fields: &[DESTINATION, DAYS, INTEREST],
    },
    Binding {
        category: Category::Weather,
        fields: &[DESTINATION, DATES],
    },
    Binding {
        category: Category::Transport,
        fields: &[DESTINATION],
    },
    Binding {
        category: Category::Festivals,
        fields: &[DESTINATION, DATES],
    },
    Binding {
        category: Category::TravelTips,
        fields: &[DESTINATION],
    },
    Binding {
        category: Category::PackingList,
        fields: &[DESTINATION, DAYS, ACTIVITIES],
    },
];

impl Binding {
    pub fn for_category(category: Category) -> Result<&'static Binding, PlanError> {
        BINDINGS
            .iter()
            .find(|binding| binding.category == category)
            .ok_or_else(|| PlanError::UnknownCategory(category.key().to_string()))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().map(|(field, _)| *field)
    }

    /// Read exactly the bound fields from `source`, renamed to template parameters.
    pub fn project<S>(&self, source: &S) -> Result<Params, PlanError>
    where
        S: FieldSource + ?Sized,
    {
        let mut params = Params::new();
        for (field, parameter) in self.fields {
            let value = source
                .value(*field)
                .ok_or(PlanError::IncompleteRequest(*field))?;
            params.insert((*parameter).to_string(), value);
        }
        debug!(category = %self.category, parameters = params.len(), "projected request");
        Ok(params)
    }
}
