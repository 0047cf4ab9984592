//! Wikimedia events CLI
//!
//! Lists, filters and inspects events from the listing page.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use wiki_events::{
    error::{AppError, Result},
    models::{Config, Event},
    pipeline,
    services::{EventFilter, EventStore, Facets, load_listing},
};

/// wiki-events - Wikimedia events listing scraper
#[derive(Parser, Debug)]
#[command(name = "wiki-events", version, about = "Wikimedia events listing scraper")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "wiki-events.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events, optionally filtered
    List {
        /// Exact country
        #[arg(long)]
        country: Option<String>,

        /// Event type the event must have
        #[arg(long)]
        event_type: Option<String>,

        /// online, in_person, hybrid, or an exact participation text
        #[arg(long)]
        participation: Option<String>,

        /// Case-insensitive text in title or topics
        #[arg(long)]
        search: Option<String>,

        /// Print the `{events, total}` JSON body
        #[arg(long)]
        json: bool,
    },

    /// Show a single event by id
    Show {
        id: u32,

        #[arg(long)]
        json: bool,
    },

    /// Show the available filter values
    Facets,

    /// Discard the cache and scrape again
    Refresh,

    /// Keep the event list refreshed on an interval
    Watch {
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,

        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_event(event: &Event) {
    println!("[{}] {}", event.id, event.title);
    println!("    Dates:         {}", event.date_range);
    println!("    Participation: {}", event.participation_option);
    println!("    Country:       {}", event.country);
    println!("    Types:         {}", event.event_types.join(", "));
    println!("    Wiki:          {}", event.wiki);
    println!("    Topics:        {}", event.topics.join(", "));
    println!("    Organizers:    {}", event.organizers.join(", "));
    println!("    Link:          {}", event.link);
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK");
        return Ok(());
    }

    let store = EventStore::from_config(&config)?;

    match cli.command {
        Command::List {
            country,
            event_type,
            participation,
            search,
            json,
        } => {
            let filter = EventFilter::from_params(
                country.as_deref(),
                event_type.as_deref(),
                participation.as_deref(),
                search.as_deref(),
            );
            let listing = load_listing(&store, &filter, &config.filter);

            if json {
                println!("{}", serde_json::to_string_pretty(&listing.response())?);
            } else {
                for event in &listing.events {
                    print_event(event);
                }
                println!("Total: {}", listing.total);
            }
            if let Some(notice) = &listing.notice {
                log::error!("{}", notice);
            }
        }

        Command::Show { id, json } => match store.try_get_event_by_id(id)? {
            Some(event) if json => println!("{}", serde_json::to_string_pretty(&event)?),
            Some(event) => print_event(&event),
            None => {
                log::error!("No event with id {}", id);
                return Err(AppError::validation(format!("event {id} not found")));
            }
        },

        Command::Facets => {
            let events = store.get_all_events()?;
            let facets = Facets::collect(&events);
            println!("{}", serde_json::to_string_pretty(&facets)?);
        }

        Command::Refresh => {
            let events = store.refresh()?;
            log::info!("Successfully refreshed {} events", events.len());
        }

        Command::Watch {
            interval_secs,
            rounds,
        } => {
            let stats =
                pipeline::run_watch(&store, Duration::from_secs(interval_secs), rounds);
            log::info!(
                "Watch finished: {} rounds, {} failures",
                stats.rounds,
                stats.failures
            );
        }

        Command::Validate => {}
    }

    Ok(())
}
