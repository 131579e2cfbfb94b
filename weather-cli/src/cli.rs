use std::io;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomUserError, Password, PasswordDisplayMode, Select, validator::Validation};
use tracing::debug;
use weather_core::{
    Config, LocationQuery, Units, WeatherError,
    config::API_KEY_ENV,
    fetch_report, provider_from_config,
    render::{RenderOptions, TableStyle, render_current, render_forecast},
};

use crate::prompt::Prompter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and a 3-day forecast from OpenWeatherMap"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and default units.
    Configure,
}

#[derive(Debug, Default, Args)]
pub struct ShowArgs {
    /// City to look up; prompted for when absent.
    #[arg(long)]
    pub city: Option<String>,

    /// Unit system (metric or imperial); prompted for when absent.
    #[arg(long)]
    pub units: Option<Units>,

    /// Fixed-width forecast table instead of the bordered one.
    #[arg(long)]
    pub plain: bool,

    /// Skip the ASCII art.
    #[arg(long)]
    pub no_art: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => show(self.show).await,
        }
    }
}

/// Single-line message printed before exiting with a failure code.
pub fn diagnostic(err: &anyhow::Error) -> String {
    match err.downcast_ref::<WeatherError>() {
        Some(weather) => weather.to_string(),
        None => format!("Error: {err:#}"),
    }
}

/// Units known without asking: `--units` first, then the stored default.
fn preset_units(flag: Option<Units>, config: &Config) -> Option<Units> {
    flag.or(config.default_units)
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    println!("\n=== Weather Forecast CLI ===");

    let config = Config::load()?;
    let provider = provider_from_config(&config, std::env::var(API_KEY_ENV).ok())?;

    let query = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

        let city = match args.city.as_deref().map(str::trim) {
            Some(city) if !city.is_empty() => city.to_string(),
            _ => prompter.city().context("Failed to read city name")?,
        };
        let units = match preset_units(args.units, &config) {
            Some(units) => units,
            None => prompter.units().context("Failed to read unit choice")?,
        };

        LocationQuery::new(city, units)
    };
    debug!(?query, "collected input");

    let report = fetch_report(&provider, &query).await?;

    let opts = RenderOptions {
        symbol: query.symbol(),
        show_art: !args.no_art,
        table: if args.plain { TableStyle::Plain } else { TableStyle::Github },
    };
    print!("{}", render_current(&report.current, &opts));
    print!("{}", render_forecast(&report.daily, &opts));
    println!("✨ Done! Have a great day.\n");

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(|input: &str| {
            Ok::<_, CustomUserError>(if input.trim().is_empty() {
                Validation::Invalid("API key cannot be empty".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()?;

    const ASK: &str = "ask every time";
    let mut choices = vec![ASK.to_string()];
    choices.extend(Units::all().iter().map(Units::to_string));

    let starting = config
        .default_units
        .and_then(|u| choices.iter().position(|c| *c == u.as_str()))
        .unwrap_or(0);
    let answer = Select::new("Default temperature unit:", choices)
        .with_starting_cursor(starting)
        .prompt()?;

    config.set_api_key(api_key);
    config.default_units = answer.parse().ok();
    let path = config.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}
