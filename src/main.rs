//! booking-rules - command-line entry point
//!
//! A thin caller around the library: it owns the selection between actions,
//! restricts input to the closed service/year enums and renders results.

use anyhow::Result;
use serde_json::json;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use booking_rules::cli::{Cli, Commands};
use booking_rules::pricing::tables;
use booking_rules::{
    evaluate_action, selectable_services, BookingScenario, Quote, ScenarioReplay,
    SelectedServices, SelectionAction, ServiceType, ServiceYear,
};

/// Initialize tracing; logs go to stderr so stdout stays parseable
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "booking_rules=debug"
    } else {
        "booking_rules=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Quote { year, services } => run_quote(year, &services, cli.json)?,
        Commands::Run { scenario } => {
            info!("Replaying scenario: {:?}", scenario);
            let scenario = BookingScenario::load_from_file(&scenario)?;
            let replay = scenario.replay();
            if cli.json {
                let output = json!({ "replay": replay, "quote": replay.quote() });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_replay(&replay);
            }
        }
        Commands::Validate { scenario } => {
            info!("Validating scenario: {:?}", scenario);
            let loaded = BookingScenario::load_from_file(&scenario)?;
            match loaded.validate() {
                Ok(()) => {
                    info!("Scenario validation successful");
                    println!("✓ Scenario is valid: {:?}", scenario);
                }
                Err(e) => {
                    warn!("Scenario validation failed: {}", e);
                    eprintln!("✗ Scenario validation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Table => print_table(cli.json)?,
    }

    Ok(())
}

/// Select each service in order, then price the result
fn run_quote(year: ServiceYear, services: &[ServiceType], as_json: bool) -> Result<()> {
    let mut selection = SelectedServices::new();
    let mut skipped = Vec::new();

    for service in services {
        let outcome = evaluate_action(&selection, SelectionAction::select(*service));
        if outcome.effect.is_rejected() {
            warn!("Skipping {}: {}", service, outcome.effect);
            skipped.push(outcome.effect.clone());
        }
        selection = outcome.selection;
    }

    let quote = Quote::new(&selection, year);
    let selectable = selectable_services(&selection);

    if as_json {
        let output = json!({ "quote": quote, "skipped": skipped, "selectable": selectable });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for effect in &skipped {
        println!("! {}", effect);
    }
    print_quote(&quote);
    println!("Selectable next: {}", SelectedServices::from_iter(selectable));
    Ok(())
}

fn print_replay(replay: &ScenarioReplay) {
    for step in &replay.steps {
        let marker = if step.outcome.effect.is_rejected() { "✗" } else { "✓" };
        println!(
            "{} {:>2}. {:<28} {}",
            marker,
            step.step,
            step.action.to_string(),
            step.outcome.effect
        );
    }
    println!();
    print_quote(&replay.quote());
}

fn print_quote(quote: &Quote) {
    println!("Year:        {}", quote.year);
    println!("Selected:    {}", quote.services);
    for line in &quote.lines {
        println!("  {:<34} {:>6}  ({})", line.item.to_string(), line.amount, line.stage);
    }
    println!("Base price:  {}", quote.price.base_price);
    println!("Final price: {}", quote.price.final_price);
}

fn print_table(as_json: bool) -> Result<()> {
    let rows: Vec<_> = ServiceYear::iter()
        .map(|year| {
            json!({
                "year": year,
                "photography": tables::PHOTOGRAPHY.get(year),
                "video_recording": tables::VIDEO_RECORDING.get(year),
                "package": tables::PACKAGE.get(year),
            })
        })
        .collect();

    if as_json {
        let output = json!({
            "years": rows,
            "wedding_session_discounted": tables::WEDDING_SESSION_DISCOUNTED,
            "wedding_session_regular": tables::WEDDING_SESSION_REGULAR,
            "complimentary_wedding_session_year": tables::COMPLIMENTARY_WEDDING_SESSION_YEAR,
            "extra_bluray": tables::EXTRA_BLURAY,
            "two_day_event": tables::TWO_DAY_EVENT,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{:<6} {:>12} {:>16} {:>8}", "Year", "Photography", "Video recording", "Package");
    for year in ServiceYear::iter() {
        println!(
            "{:<6} {:>12} {:>16} {:>8}",
            year.to_string(),
            tables::PHOTOGRAPHY.get(year),
            tables::VIDEO_RECORDING.get(year),
            tables::PACKAGE.get(year)
        );
    }
    println!();
    println!(
        "Wedding session: {} with a main service ({}: free with Photography), {} alone",
        tables::WEDDING_SESSION_DISCOUNTED,
        tables::COMPLIMENTARY_WEDDING_SESSION_YEAR,
        tables::WEDDING_SESSION_REGULAR
    );
    println!("Blu-ray package: {}", tables::EXTRA_BLURAY);
    println!("Two-day event:   {}", tables::TWO_DAY_EVENT);
    Ok(())
}
