use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tianxing::cache::ContentCache;
use tianxing::config::{Config, LoggingConfig};
use tianxing::fetcher::TianFetcher;
use tianxing::models::Category;
use tianxing::scheduler::{minute_of_day, DisplaySchedule};
use tianxing::sensor::{
    DailyWordsSensor, MorningEveningSensor, PoetrySensor, RiddleJokeSensor, ScrollingSensor,
    Sensor, SensorContext,
};

#[derive(Parser)]
#[command(
    name = "tianxing",
    version,
    about = "Tian API daily content sensors with time-slot scrolling display",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (TOML); environment variables used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (overrides the configured level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sensor poll loop
    Run {
        /// Override poll interval in hours
        #[arg(long)]
        interval_hours: Option<u64>,
    },

    /// Fetch one category once and print the payload
    Fetch {
        /// Category key (morning, maxim, poetry, songci, ...)
        category: String,
    },

    /// Warm the cache once and print the current scrolling bundle
    Show,

    /// Print the time-slot schedule table
    Schedule,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    setup_tracing(&config.logging, cli.log_format.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Run { interval_hours } => {
            run(config, interval_hours).await?;
        }

        Commands::Fetch { category } => {
            let category = Category::parse(&category)
                .with_context(|| format!("Unknown category: {category}"))?;
            fetch_one(config, category).await?;
        }

        Commands::Show => {
            show(config).await?;
        }

        Commands::Schedule => {
            for slot in DisplaySchedule::new().slots() {
                println!("{}", slot.display());
            }
        }
    }

    Ok(())
}

/// Log level: `--verbose` wins over the configured level
fn effective_level(logging: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        &logging.level
    }
}

/// Log format: the CLI flag wins over the configured format
fn effective_format<'a>(logging: &'a LoggingConfig, cli_format: Option<&'a str>) -> &'a str {
    cli_format.unwrap_or(&logging.format)
}

fn setup_tracing(logging: &LoggingConfig, cli_format: Option<&str>, verbose: bool) -> Result<()> {
    let level = effective_level(logging, verbose);
    let env_filter = tracing_subscriber::EnvFilter::new(format!("tianxing={level},warn"));

    match effective_format(logging, cli_format) {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

fn build_sensors(config: &Config) -> Result<(Vec<Box<dyn Sensor>>, Arc<ContentCache>)> {
    let fetcher = Arc::new(TianFetcher::new(&config.provider).context("Failed to create fetcher")?);
    let cache = Arc::new(ContentCache::new());

    let ctx = SensorContext {
        fetcher,
        cache: cache.clone(),
        ttl: config.cache_ttl(),
    };

    let sensors: Vec<Box<dyn Sensor>> = vec![
        Box::new(RiddleJokeSensor::new(ctx.clone())),
        Box::new(MorningEveningSensor::new(ctx.clone())),
        Box::new(PoetrySensor::new(ctx.clone())),
        Box::new(DailyWordsSensor::new(ctx)),
        Box::new(ScrollingSensor::new(cache.clone())),
    ];

    Ok((sensors, cache))
}

async fn run(config: Config, interval_hours: Option<u64>) -> Result<()> {
    let mut config = config;
    if let Some(hours) = interval_hours {
        config.poll.interval_hours = hours;
    }
    config.validate().context("Invalid configuration")?;

    let (mut sensors, _cache) = build_sensors(&config)?;
    let interval = config.poll_interval();

    tracing::info!(
        interval_hours = %config.poll.interval_hours,
        "tianxing sensor poll loop starting"
    );

    loop {
        for sensor in sensors.iter_mut() {
            sensor.update().await;
            tracing::info!(
                sensor = %sensor.name(),
                state = %sensor.state(),
                available = %sensor.available(),
                "sensor updated"
            );
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                return Ok(());
            }
        }
    }
}

async fn fetch_one(config: Config, category: Category) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let fetcher = TianFetcher::new(&config.provider)?;
    match fetcher.fetch(category).await {
        Some(payload) => {
            println!("# {} ({})", category.chinese_name(), category.key());
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        None => {
            anyhow::bail!("No data for category '{category}'");
        }
    }

    Ok(())
}

async fn show(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let fetcher = Arc::new(TianFetcher::new(&config.provider)?);
    let cache = Arc::new(ContentCache::new());
    let ttl = config.cache_ttl();

    // Warm the display categories so the bundle has data to render
    for category in DisplaySchedule::new().categories() {
        cache
            .get_or_fetch(category, ttl, || fetcher.fetch(category))
            .await;
    }

    let snapshot = cache.snapshot().await;
    let bundle = DisplaySchedule::new().resolve(minute_of_day(chrono::Local::now()), &snapshot);
    println!("{}", serde_json::to_string_pretty(&bundle)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_configured_level_used_unless_verbose() {
        let config = logging("warn", "text");
        assert_eq!(effective_level(&config, false), "warn");
        assert_eq!(effective_level(&config, true), "debug");
    }

    #[test]
    fn test_configured_format_used_unless_flag_given() {
        let config = logging("info", "json");
        assert_eq!(effective_format(&config, None), "json");
        assert_eq!(effective_format(&config, Some("text")), "text");
    }
}
