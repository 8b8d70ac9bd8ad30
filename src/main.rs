use anyhow::{ensure, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use time::macros::format_description;

mod config;
mod fetcher;
mod organization;
mod output;
mod pacing;
mod page;
mod projection;
mod transport;

#[cfg(test)]
mod test_support;

use config::{EventType, FetchConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use fetcher::{EventFetcher, FetchOutcome};
use organization::organization_id;
use output::write_events;
use pacing::{NoDelay, Pacer, RandomDelay};
use transport::{HttpTransport, PageTransport};

const DEFAULT_ORGANIZATION_URL: &str = "https://www.eventbrite.com/o/leaderboard-games-32824819501";

#[derive(Parser, Debug)]
#[command(name = "Eventbrite Upcoming Events")]
#[command(about = "Fetch an organizer's upcoming Eventbrite events and save them as JSON")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = DEFAULT_ORGANIZATION_URL, help = "Organizer page url, ending in <slug>-<organization id>")]
    organization_url: String,

    #[arg(short, long, default_value = "output/upcoming_events.json", help = "Output JSON file")]
    output: PathBuf,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, help = "Events requested per page")]
    page_size: u32,

    #[arg(long, value_enum, default_value_t = EventType::Future, help = "Which events to list")]
    event_type: EventType,

    #[arg(long, default_value_t = 3.8, help = "Minimum pause between page requests, in seconds")]
    min_delay: f64,

    #[arg(long, default_value_t = 6.3, help = "Maximum pause between page requests, in seconds")]
    max_delay: f64,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Eventbrite base url")]
    base_url: String,

    #[arg(long, help = "Per-request timeout in seconds (client default if unset)")]
    timeout: Option<u64>,

    #[arg(long, default_value = concat!("eventbrite-upcoming-events/", env!("CARGO_PKG_VERSION")), help = "User-Agent header sent with each request")]
    user_agent: String,

    #[arg(short, long, default_value = "INFO", help = "Logging level (DEBUG, INFO, WARN, ERROR)")]
    log_level: String,

    #[arg(long, help = "Disable the progress spinner")]
    no_progress: bool,
}

fn setup_logging(log_level_str: &str) -> Result<()> {
    let log_level = match log_level_str.to_uppercase().as_str() {
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        other => {
            eprintln!("Invalid log level '{}', defaulting to INFO.", other);
            LevelFilter::Info
        }
    };

    SimpleLogger::new()
        .with_level(log_level)
        .with_timestamp_format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .init()?;

    Ok(())
}

fn build_config(cli: &Cli) -> Result<FetchConfig> {
    ensure!(cli.page_size > 0, "--page-size must be at least 1");
    ensure!(
        cli.min_delay.is_finite() && cli.max_delay.is_finite(),
        "delays must be finite numbers"
    );
    ensure!(cli.min_delay >= 0.0, "--min-delay must not be negative");
    ensure!(
        cli.min_delay <= cli.max_delay,
        "--min-delay ({}) must not exceed --max-delay ({})",
        cli.min_delay,
        cli.max_delay
    );

    let id = organization_id(&cli.organization_url);
    info!("Organization id: {}", id);

    Ok(FetchConfig::new(id)
        .with_page_size(cli.page_size)
        .with_event_type(cli.event_type)
        .with_delay_range(
            Duration::from_secs_f64(cli.min_delay)..=Duration::from_secs_f64(cli.max_delay),
        )
        .with_base_url(cli.base_url.as_str()))
}

fn progress_spinner(enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}

/// Runs the fetcher and writes whatever it collected, partial results included.
fn fetch_and_write<T: PageTransport, P: Pacer>(
    config: &FetchConfig,
    transport: T,
    pacer: P,
    progress: ProgressBar,
    output_path: &Path,
) -> Result<FetchOutcome> {
    let outcome = EventFetcher::new(config, transport, pacer)
        .with_progress(progress)
        .fetch_all()
        .with_context(|| {
            format!(
                "Failed to fetch events for organization {}",
                config.organization_id
            )
        })?;

    info!(
        "Retrieved {} {} events.",
        outcome.events().len(),
        config.event_type.describe()
    );
    if let FetchOutcome::Partial { cause, .. } = &outcome {
        warn!("Fetching stopped early, saving partial results: {}", cause);
    }

    write_events(output_path, outcome.events())?;
    Ok(outcome)
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    setup_logging(&cli.log_level)?;
    info!("Fetching events listed at: {}", cli.organization_url);

    let config = build_config(&cli)?;
    let transport = HttpTransport::new(&cli.user_agent, cli.timeout.map(Duration::from_secs))
        .context("Failed to build HTTP client")?;
    let pacer: Box<dyn Pacer> = if config.delay_range.end().is_zero() {
        Box::new(NoDelay)
    } else {
        Box::new(RandomDelay::new(config.delay_range.clone()))
    };
    let progress = progress_spinner(!cli.no_progress)?;

    fetch_and_write(&config, transport, pacer, progress, &cli.output)?;

    info!("Total time elapsed: {:.2?}", start_time.elapsed());
    Ok(())
}
