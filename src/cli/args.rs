use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::catalogue::{Category, TemplateCatalogue};
use crate::request::{Interest, TripRequest};

use super::commands;

/// Entry point for the `tripmate` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "tripmate",
    about = "AI travel planner: routes, stays, itinerary, weather and more from one set of trip details",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Select the LLM provider (groq, gemini or openrouter)
    #[arg(long = "provider", global = true)]
    pub provider: Option<String>,

    /// Override the chat model for this run
    #[arg(short = 'm', long = "model", global = true)]
    pub model: Option<String>,

    /// Log LLM requests, searches and per-category timings to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a travel plan for the selected categories.
    Plan(PlanArgs),
    /// List the available categories and the trip details each one needs.
    Categories(CategoriesArgs),
    /// Show the effective configuration, or update and persist it.
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Departure city
    #[arg(long = "from")]
    pub departure_city: Option<String>,

    /// Destination city
    #[arg(long = "to")]
    pub destination_city: Option<String>,

    /// Total budget
    #[arg(long = "budget")]
    pub budget_amount: Option<u64>,

    /// Number of days
    #[arg(long = "days", value_parser = clap::value_parser!(u32).range(1..))]
    pub travel_days: Option<u32>,

    /// Main interest for the itinerary
    #[arg(long = "interest", value_enum)]
    pub interest_type: Option<Interest>,

    /// Planned activities, used for the packing list
    #[arg(long = "activities")]
    pub planned_activities: Option<String>,

    /// Travel dates as "YYYY-MM-DD to YYYY-MM-DD"
    #[arg(long = "dates")]
    pub travel_dates: Option<String>,

    /// Category to include (repeatable); defaults to every standard category
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<Category>,

    /// Prompt for every trip detail instead of reading flags
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Print the plan as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl PlanArgs {
    pub fn to_request(&self) -> TripRequest {
        TripRequest {
            departure_city: self.departure_city.clone(),
            destination_city: self.destination_city.clone(),
            budget_amount: self.budget_amount,
            travel_days: self.travel_days,
            interest_type: self.interest_type,
            planned_activities: self.planned_activities.clone(),
            travel_dates: self.travel_dates.clone(),
        }
    }

    /// Selected categories in the order given, or the standard plan.
    pub fn selected_categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            Category::DEFAULT_PLAN.to_vec()
        } else {
            self.categories.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CategoriesArgs {
    /// Print the prompt template behind one category (e.g. `itinerary`)
    #[arg(long = "show", value_name = "CATEGORY")]
    pub show: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Set the API key for the configured provider
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set the overall time limit for one category's agent, in seconds
    #[arg(long)]
    pub agent_timeout: Option<u64>,

    /// Set the maximum number of agent steps
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Set retries per LLM call on transient errors (at most 2)
    #[arg(long)]
    pub max_retries: Option<u32>,
}

impl ConfigArgs {
    pub fn has_updates(&self) -> bool {
        self.api_key.is_some()
            || self.timeout.is_some()
            || self.agent_timeout.is_some()
            || self.max_steps.is_some()
            || self.max_retries.is_some()
    }
}

impl Cli {
    pub async fn run(self, catalogue: Arc<TemplateCatalogue>) -> Result<()> {
        commands::run(self, catalogue).await
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn plan_flags_parse_into_request() {
        let cli = Cli::try_parse_from([
            "tripmate",
            "plan",
            "--from",
            "Delhi",
            "--to",
            "Jaipur",
            "--budget",
            "0",
            "--days",
            "3",
            "--interest",
            "food-and-drinks",
            "-c",
            "weather",
            "-c",
            "Train-Info",
            "--provider",
            "gemini",
        ])
        .unwrap();

        assert_eq!(cli.provider.as_deref(), Some("gemini"));
        let Some(Command::Plan(args)) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(
            args.selected_categories(),
            vec![Category::Weather, Category::DistanceTrain]
        );

        let request = args.to_request();
        assert_eq!(request.budget_amount, Some(0));
        assert_eq!(request.interest_type, Some(Interest::FoodAndDrinks));
        assert_eq!(request.travel_dates, None);
    }

    #[test]
    fn zero_days_and_unknown_category_are_rejected() {
        assert!(Cli::try_parse_from(["tripmate", "plan", "--days", "0"]).is_err());

        let err = Cli::try_parse_from(["tripmate", "plan", "-c", "nightlife"]).unwrap_err();
        assert!(err.to_string().contains("nightlife"));
    }

    #[test]
    fn default_selection_is_standard_plan() {
        let args = PlanArgs::default();
        assert_eq!(args.selected_categories(), Category::DEFAULT_PLAN.to_vec());
        assert!(!args.selected_categories().contains(&Category::FlightInfo));
    }
}
