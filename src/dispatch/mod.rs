//! Fans one trip request out to the selected categories.
//!
//! Categories run strictly one after another. `weather` goes to the
//! [`ForecastProvider`]; every other category is rendered from its template
//! and handed to the [`AgentInvoker`]. A failing category is recorded in the
//! plan and never stops the rest.

mod plan;

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::agent::AgentInvoker;
use crate::catalogue::{Category, Params, TemplateCatalogue};
use crate::error::PlanError;
use crate::forecast::ForecastProvider;
use crate::request::{Binding, FieldSource};
use crate::sanitize;

pub use plan::{PlanEntry, RenderedEntry, TravelPlan};

pub struct Dispatcher {
    catalogue: Arc<TemplateCatalogue>,
    agent: Arc<dyn AgentInvoker>,
    forecast: Arc<dyn ForecastProvider>,
}

impl Dispatcher {
    pub fn new(
        catalogue: Arc<TemplateCatalogue>,
        agent: Arc<dyn AgentInvoker>,
        forecast: Arc<dyn ForecastProvider>,
    ) -> Self {
        Self {
            catalogue,
            agent,
            forecast,
        }
    }

    pub async fn run<S>(&self, categories: &[Category], request: &S) -> TravelPlan
    where
        S: FieldSource + ?Sized,
    {
        let started = Instant::now();
        let mut plan = TravelPlan::default();

        for &category in categories {
            if plan.contains(category) {
                continue;
            }

            let category_started = Instant::now();
            let outcome = self
                .render(category, request)
                .await
                .map(|raw| sanitize::clean(&raw).into_owned());
            let elapsed_ms = category_started.elapsed().as_millis() as u64;

            match &outcome {
                Ok(text) => info!(category = %category, elapsed_ms, chars = text.len(), "category completed"),
                Err(err) if err.is_misconfiguration() => {
                    error!(category = %category, error = %err, "category template misconfigured")
                }
                Err(err) => warn!(category = %category, elapsed_ms, error = %err, "category failed"),
            }

            plan.push(PlanEntry {
                category,
                outcome,
                elapsed_ms,
            });
        }

        info!(
            categories = plan.entries().len(),
            failures = plan.failures(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan finished"
        );
        plan
    }

    async fn render<S>(&self, category: Category, request: &S) -> Result<String, PlanError>
    where
        S: FieldSource + ?Sized,
    {
        let params = Binding::for_category(category)?.project(request)?;

        if category == Category::Weather {
            let city = param(&params, "destination_city");
            let dates = param(&params, "travel_dates");
            return self.forecast.forecast(city, dates).await;
        }

        let prompt = self.catalogue.instantiate(category, &params)?;
        self.agent.invoke(&prompt).await
    }
}

fn param<'a>(params: &'a Params, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}
