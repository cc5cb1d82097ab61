use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use weatherbit_core::{
    Config, CurrentResponse, Language, Unit, WeatherProvider, provider::MAX_FORECAST_DAYS,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbit", version, about = "Weatherbit CLI")]
pub struct Cli {
    /// Print the raw JSON instead of a human-readable summary.
    #[arg(long, global = true)]
    pub json: bool,

    /// Show condition descriptions in Korean where available.
    #[arg(long, global = true)]
    pub korean: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and request defaults.
    Configure,

    /// Current conditions.
    Now(NowArgs),

    /// Daily forecast by coordinates.
    Forecast {
        #[command(flatten)]
        at: Coordinates,

        /// Number of days, 1 to 16.
        #[arg(
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u8).range(1..=MAX_FORECAST_DAYS as i64)
        )]
        days: u8,
    },

    /// Today's weather with day/night icon and min/max temperature.
    Summary {
        #[command(flatten)]
        at: Coordinates,
    },
}

#[derive(Debug, Args)]
pub struct Coordinates {
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Debug, Args)]
pub struct NowArgs {
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// City name, e.g. "Raleigh".
    #[arg(long, conflicts_with_all = ["lat", "postal_code", "cities"])]
    pub city: Option<String>,

    /// State or province code, used with --city.
    #[arg(long, requires = "city")]
    pub state: Option<String>,

    /// Country code, used with --city or --postal-code.
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long, conflicts_with_all = ["lat", "cities"])]
    pub postal_code: Option<String>,

    /// Comma-separated Weatherbit city ids.
    #[arg(long, value_delimiter = ',', conflicts_with = "lat")]
    pub cities: Vec<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let style = render::Style { json: self.json, korean: self.korean };

        match self.command {
            Command::Configure => configure(),
            Command::Now(args) => {
                let (config, provider) = connect()?;
                let response = now(provider.as_ref(), &args).await?;
                render::current(&style, config.unit, provider.reference_timezone(), &response)
            }
            Command::Forecast { at, days } => {
                let (config, provider) = connect()?;
                let response = provider.forecast_daily_by_coordinates(at.lat, at.lon, days).await?;
                render::forecast(&style, config.unit, &response)
            }
            Command::Summary { at } => {
                let (config, provider) = connect()?;
                let current = provider.current_for_app_by_coordinates(at.lat, at.lon).await?;
                let forecast = provider.forecast_for_app_by_coordinates(at.lat, at.lon).await?;
                render::summary(&style, config.unit, &current, &forecast)
            }
        }
    }
}

async fn now(provider: &dyn WeatherProvider, args: &NowArgs) -> anyhow::Result<CurrentResponse> {
    let country = args.country.as_deref();
    let response = if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        provider.now_by_coordinates(lat, lon).await?
    } else if let Some(city) = &args.city {
        provider.now_by_city_name(city, args.state.as_deref(), country).await?
    } else if let Some(postal_code) = &args.postal_code {
        provider.now_by_postal_code(postal_code, country).await?
    } else if !args.cities.is_empty() {
        let ids: Vec<&str> = args.cities.iter().map(String::as_str).collect();
        provider.now_by_cities(&ids).await?
    } else {
        return Err(anyhow!("Specify a location: --lat/--lon, --city, --postal-code or --cities."));
    };
    Ok(response)
}

fn connect() -> anyhow::Result<(Config, Box<dyn WeatherProvider>)> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    tracing::debug!(
        lang = %config.lang,
        unit = %config.unit,
        https = config.use_https,
        "provider ready"
    );
    Ok((config, provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Weatherbit API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    config.use_https = Confirm::new("Use HTTPS?")
        .with_default(config.use_https)
        .prompt()
        .context("Failed to read HTTPS choice")?;

    let languages = Language::all();
    let cursor = languages.iter().position(|l| *l == config.lang).unwrap_or(0);
    config.lang = Select::new("Response language:", languages.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read language")?;

    let units = Unit::all();
    let cursor = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Units:", units.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read units")?;

    let timezone = Text::new("Reference timezone (IANA):")
        .with_default(&config.reference_timezone)
        .prompt()
        .context("Failed to read timezone")?;
    timezone
        .parse::<Tz>()
        .map_err(|_| anyhow!("Unknown timezone '{timezone}'"))?;
    config.reference_timezone = timezone;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    if !config.is_configured() {
        println!("No API key is set yet; run `weatherbit configure` again to add one.");
    }

    Ok(())
}
