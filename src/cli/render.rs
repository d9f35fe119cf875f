use anyhow::{Context, Result};
use colored::*;

use crate::catalogue::{Category, TemplateCatalogue};
use crate::dispatch::TravelPlan;
use crate::request::{Binding, FieldSource, TripRequest};

pub(crate) fn print_request_summary(request: &TripRequest, categories: &[Category]) {
    println!("{}", "🧭 Planning your trip".bold().cyan());
    for field in request.supplied_fields() {
        if let Some(value) = request.value(field) {
            println!("   {}: {}", field.label(), value);
        }
    }
    let titles: Vec<&str> = categories.iter().map(|c| c.title()).collect();
    println!("   Sections: {}", titles.join(", "));
    println!();
}

pub(crate) fn print_plan(plan: &TravelPlan) {
    for entry in plan.entries() {
        let heading = format!("## {}", entry.category.title());
        if entry.is_success() {
            println!("{}", heading.bold().green());
        } else {
            println!("{}", heading.bold().yellow());
        }
        println!("{}", entry.text());
        println!();
    }

    let failures = plan.failures();
    if failures > 0 {
        println!(
            "{}",
            format!("⚠️  {failures} of {} sections could not be completed.", plan.entries().len())
                .yellow()
        );
    }
}

pub(crate) fn plan_json(plan: &TravelPlan) -> Result<String> {
    serde_json::to_string_pretty(&plan.rendered()).context("Failed to serialize plan to JSON")
}

pub(crate) fn print_categories(catalogue: &TemplateCatalogue) -> Result<()> {
    println!("{}", "📚 Available categories".bold());
    println!();
    for template in catalogue.templates() {
        let category = template.category();
        let binding = Binding::for_category(category)?;
        let fields: Vec<&str> = binding.required_fields().map(|f| f.label()).collect();
        let default_marker = if Category::DEFAULT_PLAN.contains(&category) {
            ""
        } else {
            " (not in default plan)"
        };
        println!(
            "  {} {}{}",
            format!("{:<20}", category.key()).cyan(),
            category.title(),
            default_marker
        );
        println!("  {:<20} needs: {}", "", fields.join(", "));
        println!("  {:<20} template parameters: {}", "", template.parameters().join(", "));
    }
    Ok(())
}

pub(crate) fn print_template(catalogue: &TemplateCatalogue, name: &str) -> Result<()> {
    let template = catalogue.lookup(name)?;
    let category = template.category();
    println!("{}", format!("## {} ({})", category.title(), category.key()).bold());
    println!("{}", template.body().trim());
    Ok(())
}
