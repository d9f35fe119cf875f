use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PlanError;

/// One kind of travel-planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DistanceTrain,
    FlightInfo,
    HotelsFoodPlaces,
    Itinerary,
    Weather,
    Transport,
    Festivals,
    TravelTips,
    PackingList,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::DistanceTrain,
        Category::FlightInfo,
        Category::HotelsFoodPlaces,
        Category::Itinerary,
        Category::Weather,
        Category::Transport,
        Category::Festivals,
        Category::TravelTips,
        Category::PackingList,
    ];

    /// Categories produced when the user does not pick any.
    pub const DEFAULT_PLAN: [Category; 8] = [
        Category::DistanceTrain,
        Category::HotelsFoodPlaces,
        Category::Itinerary,
        Category::Weather,
        Category::Transport,
        Category::Festivals,
        Category::TravelTips,
        Category::PackingList,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::DistanceTrain => "distance_train",
            Category::FlightInfo => "flight_info",
            Category::HotelsFoodPlaces => "hotels_food_places",
            Category::Itinerary => "itinerary",
            Category::Weather => "weather",
            Category::Transport => "transport",
            Category::Festivals => "festivals",
            Category::TravelTips => "travel_tips",
            Category::PackingList => "packing_list",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::DistanceTrain => "Distance & Train Info",
            Category::FlightInfo => "Flight Options",
            Category::HotelsFoodPlaces => "Hotels, Foods & Places",
            Category::Itinerary => "Customized Itinerary",
            Category::Weather => "Weather Forecast",
            Category::Transport => "Local Transport",
            Category::Festivals => "Events & Festivals",
            Category::TravelTips => "Travel Tips & Alerts",
            Category::PackingList => "Packing List",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "train_info" {
            return Ok(Category::DistanceTrain);
        }

        Category::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| PlanError::UnknownCategory(s.trim().to_string()))
    }
}
