use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use forecast_core::{
    Config, Coordinates, ForecastClient, ForecastResponse, valid_api_key, valid_lang_code,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "5-day forecast CLI for OpenWeatherMap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Query options shared by all forecast subcommands.
#[derive(Debug, Args)]
pub struct QueryOpts {
    /// Number of forecast entries to request.
    #[arg(long, default_value_t = 5)]
    pub days: u32,

    /// Unit system: standard, metric or imperial. Defaults to the configured one.
    #[arg(long)]
    pub unit: Option<String>,

    /// Language code for condition descriptions. Defaults to the configured one.
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default unit/language interactively.
    Configure,

    /// Forecast for a location given by name.
    Name {
        /// Location name, e.g. "London" or "Kyiv,UA".
        location: String,

        #[command(flatten)]
        opts: QueryOpts,
    },

    /// Forecast for a location given by coordinates.
    Coords {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[command(flatten)]
        opts: QueryOpts,
    },

    /// Forecast for a location given by its city ID.
    Id {
        /// OpenWeatherMap city ID, e.g. 2643743 for London.
        id: i64,

        #[command(flatten)]
        opts: QueryOpts,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Name { location, opts } => {
                let client = client_from_config(&opts)?;
                let forecast = client.forecast_by_name(&location, opts.days).await?;
                print_forecast(&forecast);
                Ok(())
            }
            Command::Coords { lat, lon, opts } => {
                let client = client_from_config(&opts)?;
                let coords = Coordinates { lat, lon };
                let forecast = client.forecast_by_coordinates(&coords, opts.days).await?;
                print_forecast(&forecast);
                Ok(())
            }
            Command::Id { id, opts } => {
                let client = client_from_config(&opts)?;
                let forecast = client.forecast_by_id(id, opts.days).await?;
                print_forecast(&forecast);
                Ok(())
            }
        }
    }
}

/// Build a client from the stored config, with per-invocation overrides.
fn client_from_config(opts: &QueryOpts) -> anyhow::Result<ForecastClient> {
    let cfg = Config::load()?;
    let api_key = cfg.api_key()?;

    let unit = opts.unit.as_deref().unwrap_or_else(|| cfg.unit_or_default());
    let lang = opts.lang.as_deref().unwrap_or_else(|| cfg.lang_or_default());

    let client = ForecastClient::new(unit, lang, api_key, vec![])?;
    Ok(client)
}

/// Interactive configuration: prompt for the API key and defaults, then save.
fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = inquire::Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;
    let key = key.trim().to_string();

    if !valid_api_key(&key) {
        anyhow::bail!("Invalid API key: expected 32 lowercase alphanumeric characters.");
    }

    let unit = inquire::Select::new(
        "Default unit system:",
        vec!["metric", "imperial", "standard"],
    )
    .prompt()
    .context("Failed to read unit system")?;

    let lang = inquire::Text::new("Default language code:")
        .with_default("en")
        .prompt()
        .context("Failed to read language code")?;
    let lang = lang.trim().to_lowercase();

    if !valid_lang_code(&lang) {
        anyhow::bail!("Unsupported language code '{lang}'.");
    }

    cfg.api_key = Some(key);
    cfg.unit = Some(unit.to_string());
    cfg.lang = Some(lang);
    cfg.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Print a city header followed by one line per forecast entry.
fn print_forecast(forecast: &ForecastResponse) {
    println!(
        "{}, {} ({} entries)",
        forecast.city.name, forecast.city.country, forecast.cnt
    );

    for entry in &forecast.list {
        let when = entry
            .timestamp()
            .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| format!("dt={}", entry.dt));

        let condition = entry
            .weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("unknown");

        println!(
            "{when}  {:>6.1}°  {condition}, humidity {}%, wind {:.1} m/s at {:.0}°",
            entry.main.temp, entry.main.humidity, entry.wind.speed, entry.wind.deg
        );
    }
}
