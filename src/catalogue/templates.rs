use super::Category;

pub(super) const DISTANCE_TRAIN: &str = r#"
Fetch verified data for travel from {departure_city} to {destination_city} on a budget of {budget_amount}.

**1. Distance**
- Exact distance in km.

**2. Train Ticket Options**
- Provide details for up to **2-3** relevant train or flight options in the following table:
- If train details are not available then provide flight details in the same structured format.
| Train Name | Train Number | Departure | Arrival | Sleeper | 3AC | 2AC |
| --- | --- | --- | --- | --- | --- | --- |
- Give relevant prices in rupees.
- Only the **top 2-3 relevant trains** should be included, or 2-3 relevant flights.
- Ensure accurate pricing and booking links.
"#;

pub(super) const FLIGHT_INFO: &str = r#"
Provide flight options from {departure_city} to {destination_city} under a {budget_amount} budget.

Show only the top 2-3 relevant options in the table below:

| Airline | Flight No. | Departure Time | Arrival Time | Duration | Price (₹) | Booking Link |
| ------- | ---------- | -------------- | ------------ | -------- | --------- | ------------ |

- Ensure prices are in rupees.
- Only show budget-friendly options that fall within the specified range.
- If a booking link is not available, mention "https://www.google.com/flights".
- Ensure the flights are realistic and commonly available.
"#;

pub(super) const HOTELS_FOOD_PLACES: &str = r#"
Provide the **top 2-3 budget hotels**, famous local foods, and must-visit places in {destination_city}.

**1. Hotels** (within a budget of {budget_amount})
List **only the 2-3 best hotels** within the budget, formatted as:
- Ensure prices are in rupees.
| Hotel Name | Price/Night | Location | Rating ⭐ | Booking Link |
| --- | --- | --- | --- | --- |
- If the hotel booking website is not available then mention https://www.makemytrip.com/hotels/ instead.
- If specific hotel prices are unavailable, provide general price ranges.

**2. Local Foods**
| Dish | Description |
| --- | ----------- |

**3. Famous Places to Visit**
Provide **only 4-5** key attractions in a structured table:
| Place Name | Description | Visit Duration | Entry Fee |
| --- | --- | --- | --- |
"#;

pub(super) const ITINERARY: &str = r#"
Create a {travel_days}-day itinerary for {destination_city} focused on {interest_type}.
- Use this structured format:
| Day | Morning | Afternoon | Evening | Duration |
| --- | ------- | --------- | ------- | -------- |
"#;

pub(super) const WEATHER: &str = r#"
Provide a weather forecast for {destination_city} from {travel_dates}.
- Use this structured format.
- If you cannot provide proper information then say so; do not provide wrong information.
| Date | Morning Temp | Afternoon Temp | Evening Temp | Conditions |
| ---- | ------------ | -------------- | ------------ | ---------- |
"#;

pub(super) const TRANSPORT: &str = r#"
Provide local transport options for {destination_city}.
- Use this structured format:
| Mode | Cost | Availability | Duration |
| ---- | ---- | ------------ | -------- |
"#;

pub(super) const FESTIVALS: &str = r#"
List events and festivals in {destination_city} during {travel_dates}.
If there are no events or festivals then say so; do not give wrong information.
| Event Name | Description | Date & Time | Venue |
| ---------- | ----------- | ----------- | ----- |
"#;

pub(super) const TRAVEL_TIPS: &str = r#"
Provide travel safety tips and alerts for {destination_city}.

| Tip Type | Details |
| -------- | ------- |
| Safety   | [Safety Tip] |
| Visa     | [Visa Details] |
| COVID-19 | [Guidelines] |
"#;

pub(super) const PACKING_LIST: &str = r#"
Generate a packing list for a {travel_days}-day trip to {destination_city} considering {planned_activities}.

**Packing List**
| Item | Quantity |
| ---- | -------- |
| Lightweight clothes | 5 |
| Walking shoes | 2 pairs |
| Travel documents | 1 set |
"#;

/// Declared parameters and body for every category, in catalogue order.
pub(super) fn standard_definitions() -> Vec<(Category, &'static [&'static str], &'static str)> {
    vec![
        (
            Category::DistanceTrain,
            &["departure_city", "destination_city", "budget_amount"],
            DISTANCE_TRAIN,
        ),
        (
            Category::FlightInfo,
            &["departure_city", "destination_city", "budget_amount"],
            FLIGHT_INFO,
        ),
        (
            Category::HotelsFoodPlaces,
            &["destination_city", "budget_amount"],
            HOTELS_FOOD_PLACES,
        ),
        (
            Category::Itinerary,
            &["destination_city", "travel_days", "interest_type"],
            ITINERARY,
        ),
        (
            Category::Weather,
            &["destination_city", "travel_dates"],
            WEATHER,
        ),
        (Category::Transport, &["destination_city"], TRANSPORT),
        (
            Category::Festivals,
            &["destination_city", "travel_dates"],
            FESTIVALS,
        ),
        (Category::TravelTips, &["destination_city"], TRAVEL_TIPS),
        (
            Category::PackingList,
            &["destination_city", "travel_days", "planned_activities"],
            PACKING_LIST,
        ),
    ]
}
