use anyhow::{Context, Result};
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::agent::{DuckDuckGoSearch, ReactAgent, SearchTool};
use crate::catalogue::TemplateCatalogue;
use crate::client::{AIClient, DynLlmClient};
use crate::config::{Config, LlmProvider};
use crate::dispatch::Dispatcher;
use crate::forecast::{ForecastClient, OpenMeteoClient};

use super::args::{Cli, Command, PlanArgs};
use super::config_cmd;
use super::form;
use super::render;

pub(crate) async fn run(cli: Cli, catalogue: Arc<TemplateCatalogue>) -> Result<()> {
    match cli.command {
        None => show_welcome_message(),
        Some(Command::Categories(ref args)) => match args.show.as_deref() {
            Some(name) => render::print_template(&catalogue, name),
            None => render::print_categories(&catalogue),
        },
        Some(Command::Config(ref args)) => {
            config_cmd::handle_config(cli.provider.as_deref(), cli.model.as_deref(), args)
        }
        Some(Command::Plan(ref args)) => {
            let provider = cli
                .provider
                .as_deref()
                .map(LlmProvider::from_str)
                .transpose()?;
            let config = Config::load_with_overrides(provider, cli.model.clone())?;
            handle_plan(args, &config, catalogue).await
        }
    }
}

async fn handle_plan(
    args: &PlanArgs,
    config: &Config,
    catalogue: Arc<TemplateCatalogue>,
) -> Result<()> {
    config.validate()?;

    let request = if args.interactive {
        let stdin = io::stdin();
        form::prompt_request(&mut stdin.lock(), &mut io::stdout(), args)?
    } else {
        args.to_request()
    };
    let categories = args.selected_categories();

    let dispatcher = build_dispatcher(config, catalogue)?;
    debug!(provider = %config.llm.provider, model = %config.models.model, "dispatcher ready");

    if !args.json {
        render::print_request_summary(&request, &categories);
    }

    let plan = dispatcher.run(&categories, &request).await;

    if args.json {
        println!("{}", render::plan_json(&plan)?);
    } else {
        render::print_plan(&plan);
    }
    Ok(())
}

fn build_dispatcher(config: &Config, catalogue: Arc<TemplateCatalogue>) -> Result<Dispatcher> {
    let llm: Arc<DynLlmClient> =
        Arc::new(AIClient::new(&config.llm).context("Failed to create LLM client")?);
    let search: Arc<dyn SearchTool> = Arc::new(DuckDuckGoSearch::new(
        &config.services.search_url,
        config.llm.timeout_secs,
        &config.llm.user_agent,
    )?);
    let agent = ReactAgent::new(llm, search, config.models.clone(), &config.agent);

    let weather = OpenMeteoClient::new(
        &config.services,
        config.llm.timeout_secs,
        &config.llm.user_agent,
    )?;

    Ok(Dispatcher::new(
        catalogue,
        Arc::new(agent),
        Arc::new(ForecastClient::new(weather)),
    ))
}

fn show_welcome_message() -> Result<()> {
    let config_path = Config::config_path()?;

    println!("🌍 Welcome to tripmate - your AI travel planner!");
    println!();
    println!("📖 What tripmate does:");
    println!("   • Researches routes, flights, stays, food and sights with a web-searching agent");
    println!("   • Builds day-by-day itineraries and packing lists");
    println!("   • Fetches a real daily weather forecast from Open-Meteo");
    println!("   • Works with Groq, Google Gemini or OpenRouter models");
    println!();
    println!("💡 How to use tripmate:");
    println!("   tripmate plan --interactive                                # Fill in the trip form");
    println!(
        "   tripmate plan --from Delhi --to Jaipur --budget 20000 \\"
    );
    println!("        --days 3 --interest sightseeing --activities trekking \\");
    println!("        --dates '2025-10-01 to 2025-10-03'                    # Full plan");
    println!("   tripmate plan --to Jaipur --dates '2025-10-01 to 2025-10-03' -c weather");
    println!("   tripmate categories                                        # What each section needs");
    println!("   tripmate config --provider gemini --api-key YOUR_KEY       # Save settings");
    println!();

    match Config::load() {
        Ok(config) => {
            println!("📋 Current setup:");
            println!(
                "   Provider: {} ({})",
                config.llm.provider,
                config.llm.provider.display_name()
            );
            println!("   Model: {}", config.models.model);
            if config.llm.api_key.trim().is_empty() {
                println!(
                    "   ⚠️  No API key yet. Set {} or run 'tripmate config --api-key <KEY>'.",
                    config.llm.provider.api_key_env_var()
                );
            }
        }
        Err(err) => {
            println!("⚠️  Configuration at {} couldn't be loaded: {err:#}", config_path.display());
        }
    }
    println!();

    println!("❓ For more help: tripmate --help");
    Ok(())
}
