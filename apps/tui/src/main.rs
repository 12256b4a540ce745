mod app;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use ratatui_sales_dash::cli::CliArgs;
use ratatui_sales_dash::domain::{clamp_year, Region};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Initialize application state
    let mut app = App::new();
    apply_filter_args(&mut app, &args)?;

    // Run without a UI when asked to, or when stdout is not a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    if let Err(e) = app.initialize() {
        eprintln!("Error initializing the API client: {e}");
        eprintln!("Will continue; press f to retry once the environment is fixed");
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

/// Seed the filters from the command line before the first fetch.
fn apply_filter_args(app: &mut App, args: &CliArgs) -> Result<()> {
    if let Some(raw) = &args.region {
        let region = Region::parse(raw).ok_or_else(|| eyre!("unknown region: {raw}"))?;
        app.filters.set_region(region);
    }

    if let Some(year) = args.year {
        app.filters.all_period = false;
        app.filters.year = clamp_year(year);
    }

    Ok(())
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
