use anyhow::Result;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

use crate::forecast::DateRange;
use crate::request::{Field, Interest, TripRequest};

use super::args::PlanArgs;
use super::util::{prompt_choice, prompt_parsed, prompt_text};

/// Ask for every trip detail, offering any flag values as defaults. Every
/// field of the returned request is present.
pub(crate) fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: &PlanArgs,
) -> Result<TripRequest> {
    writeln!(output, "🧳 Trip details")?;

    let departure_city = prompt_text(
        input,
        output,
        Field::DepartureCity.label(),
        defaults.departure_city.as_deref(),
    )?;
    let destination_city = prompt_text(
        input,
        output,
        Field::DestinationCity.label(),
        defaults.destination_city.as_deref(),
    )?;
    let budget_amount = prompt_parsed(
        input,
        output,
        Field::BudgetAmount.label(),
        defaults.budget_amount,
        |_| Ok(()),
    )?;
    let travel_days = prompt_parsed(
        input,
        output,
        Field::TravelDays.label(),
        defaults.travel_days.or(Some(1)),
        |days: &u32| {
            if *days >= 1 {
                Ok(())
            } else {
                Err("Number of Days must be at least 1.".to_string())
            }
        },
    )?;

    let interests: Vec<String> = Interest::ALL.iter().map(ToString::to_string).collect();
    let current = defaults
        .interest_type
        .and_then(|interest| Interest::ALL.iter().position(|i| *i == interest))
        .or(Some(0));
    let interest_idx = prompt_choice(input, output, Field::InterestType.label(), &interests, current)?;

    let planned_activities = prompt_text(
        input,
        output,
        Field::PlannedActivities.label(),
        defaults.planned_activities.as_deref(),
    )?;
    let flag_range = defaults
        .travel_dates
        .as_deref()
        .and_then(|raw| DateRange::parse(raw).ok());
    let travel_dates = prompt_travel_dates(input, output, flag_range)?;

    Ok(TripRequest {
        departure_city: Some(departure_city),
        destination_city: Some(destination_city),
        budget_amount: Some(budget_amount),
        travel_days: Some(travel_days),
        interest_type: Some(Interest::ALL[interest_idx]),
        planned_activities: Some(planned_activities),
        travel_dates: Some(travel_dates),
    })
}

/// An unparseable `--dates` flag offers no default rather than failing the form.
fn prompt_travel_dates<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: Option<DateRange>,
) -> Result<String> {
    let start: NaiveDate = prompt_parsed(
        input,
        output,
        "Start Date (YYYY-MM-DD)",
        defaults.map(|range| range.start),
        |_| Ok(()),
    )?;
    let default_end = defaults
        .map(|range| range.end)
        .filter(|end| *end >= start)
        .unwrap_or(start);
    let end: NaiveDate = prompt_parsed(
        input,
        output,
        "End Date (YYYY-MM-DD)",
        Some(default_end),
        |end: &NaiveDate| {
            if *end >= start {
                Ok(())
            } else {
                Err("End date cannot be before the start date.".to_string())
            }
        },
    )?;

    Ok(format!(
        "{} to {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    ))
}
