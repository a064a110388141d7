//! `fbsearch` — terminal front end for the Facebook post search tool.
//!
//! Collects the search parameters from flags or interactive prompts, runs
//! one search session against Apify, prints the records as a table, and
//! offers JSON/CSV export.

mod config;
mod table;

use std::fs;

use anyhow::Result;
use apify_client::{ApifyClient, SearchRequest};
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use post_search::export;
use post_search::{SearchSession, SessionState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "fbsearch", about = "Search public Facebook posts via Apify")]
struct Cli {
    /// Search query text
    #[arg(long)]
    query: Option<String>,

    /// Facebook location UID (empty uses the actor's default location)
    #[arg(long)]
    location: Option<String>,

    /// Start date, YYYY-MM-DD
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End date, YYYY-MM-DD
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Maximum number of posts to request
    #[arg(long)]
    max: Option<u32>,

    /// Write apify_results.json without asking
    #[arg(long)]
    export_json: bool,

    /// Write apify_results.csv without asking
    #[arg(long)]
    export_csv: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    println!("{}", "Facebook Post Search Tool".bright_cyan().bold());
    println!();

    let request = build_request(&cli)?;

    let mut session = SearchSession::new(ApifyClient::new(config.apify_token));
    println!();
    println!(
        "{}",
        "Searching… the scrape can take a little while.".dimmed()
    );
    match session.run_search(request).await {
        SessionState::Failed => {
            println!("{}", "Search failed, nothing to show.".bright_red());
            std::process::exit(1);
        }
        SessionState::Ready(items) if !items.is_empty() => {
            if let Some(rendered) = table::render(items) {
                println!();
                println!("{rendered}");
                println!();
                println!("{} posts", items.len().to_string().bright_green());
            }
            run_exports(&cli, items)?;
        }
        // Ready with an empty set; run_search never returns Idle or Loading.
        _ => {
            println!(
                "{}",
                "No posts came back before the poll budget ran out.".bright_yellow()
            );
        }
    }

    Ok(())
}

/// Fill in anything the flags didn't provide by prompting, mirroring the
/// original form fields.
fn build_request(cli: &Cli) -> Result<SearchRequest> {
    let theme = ColorfulTheme::default();

    let query = match &cli.query {
        Some(query) => query.clone(),
        None => Input::with_theme(&theme)
            .with_prompt("Search query")
            .interact_text()?,
    };
    let location_uid = match &cli.location {
        Some(location) => location.clone(),
        None => Input::with_theme(&theme)
            .with_prompt("Location UID (blank for default)")
            .allow_empty(true)
            .interact_text()?,
    };
    let start_date = match cli.from {
        Some(date) => date,
        None => prompt_date(&theme, "Start date (YYYY-MM-DD)")?,
    };
    let end_date = match cli.to {
        Some(date) => date,
        None => prompt_date(&theme, "End date (YYYY-MM-DD)")?,
    };
    let max_results = match cli.max {
        Some(max) => max,
        None => Input::with_theme(&theme)
            .with_prompt("Max results")
            .default(100)
            .interact_text()?,
    };

    Ok(SearchRequest {
        query,
        location_uid,
        start_date,
        end_date,
        max_results,
    })
}

fn prompt_date(theme: &ColorfulTheme, prompt: &str) -> Result<NaiveDate> {
    let text: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| {
            value
                .parse::<NaiveDate>()
                .map(|_| ())
                .map_err(|_| "expected a date like 2024-03-01")
        })
        .interact_text()?;
    Ok(text.parse()?)
}

/// Write the requested export files. Empty result sets write nothing and
/// raise nothing; the exporters hand back `None` in that case.
fn run_exports(cli: &Cli, results: &post_search::ResultSet) -> Result<()> {
    let interactive = !cli.export_json && !cli.export_csv;

    let want_json = cli.export_json
        || (interactive
            && Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Export JSON?")
                .default(false)
                .interact()?);
    if want_json {
        write_export(export::JSON_FILENAME, export::to_json(results))?;
    }

    let want_csv = cli.export_csv
        || (interactive
            && Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Export CSV?")
                .default(false)
                .interact()?);
    if want_csv {
        write_export(export::CSV_FILENAME, export::to_csv(results))?;
    }

    Ok(())
}

fn write_export(path: &str, body: Option<String>) -> Result<()> {
    if let Some(body) = body {
        fs::write(path, body)?;
        println!("{} {}", "Saved".bright_green(), path);
    }
    Ok(())
}
