use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Select, Text};

use weatherglass_core::search::{GeoError, GeoLocator};
use weatherglass_core::{Config, Shell, Tab, WeatherApi, WeatherstackClient};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherglass", version, about = "Weatherstack terminal client")]
pub struct Cli {
    /// With no subcommand, an interactive tabbed session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Weatherstack access key in the platform config directory.
    Configure,

    /// Current conditions for a location.
    Current {
        /// Place name, postal code, "lat,lon", or "fetch:ip".
        query: String,

        /// Print the raw provider response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Hourly conditions for one past date.
    Historical {
        /// Place name, postal code, or "lat,lon".
        query: String,

        /// Date as YYYY-MM-DD.
        date: NaiveDate,

        /// Print the raw provider response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Marine conditions near a coordinate pair.
    Marine {
        /// Latitude, e.g. 40.71
        lat: String,

        /// Longitude, e.g. -74.01
        lon: String,

        /// Print the raw provider response as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Current { query, json }) => {
                let response = client()?.current(&query).await?;
                if json {
                    print_json(&response)
                } else {
                    render::current(&response);
                    Ok(())
                }
            }
            Some(Command::Historical { query, date, json }) => {
                let response = client()?.historical(&query, date).await?;
                if json {
                    print_json(&response)
                } else {
                    render::historical(&response);
                    Ok(())
                }
            }
            Some(Command::Marine { lat, lon, json }) => {
                let response = client()?.marine(&lat, &lon).await?;
                if json {
                    print_json(&response)
                } else {
                    render::marine(&response);
                    Ok(())
                }
            }
            None => interactive().await,
        }
    }
}

fn client() -> anyhow::Result<WeatherstackClient> {
    let config = Config::load()?;
    Ok(WeatherstackClient::new(&config))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{text}");
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let api_key = Password::new("Weatherstack access key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read access key")?;

    let config = Config::new(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// A terminal has no device-position source, so "use current position"
/// always takes the provider's IP-lookup fallback.
struct NoDevicePosition;

impl GeoLocator for NoDevicePosition {
    fn locate(&self) -> Result<(f64, f64), GeoError> {
        Err(GeoError::Unavailable)
    }
}

/// Interactive tabbed session. Each tab keeps its own request state for the
/// whole session; switching tabs shows whatever the hidden view last held.
async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = WeatherstackClient::new(&config);
    let mut shell = Shell::new();

    loop {
        let mut options: Vec<&str> = Tab::all().iter().map(Tab::as_str).collect();
        options.push("quit");

        let choice = Select::new("View:", options).prompt()?;
        match choice {
            "current" => {
                shell.select(Tab::Current);
                current_tab(&mut shell, &client).await?;
            }
            "historical" => {
                shell.select(Tab::Historical);
                historical_tab(&mut shell, &client).await?;
            }
            "marine" => {
                shell.select(Tab::Marine);
                marine_tab(&mut shell, &client).await?;
            }
            _ => return Ok(()),
        }
    }
}

async fn current_tab(shell: &mut Shell, client: &WeatherstackClient) -> anyhow::Result<()> {
    if let Some(data) = shell.current.data() {
        render::current(data);
    }

    let action = Select::new(
        "Current weather:",
        vec!["search location", "use current position", "back"],
    )
    .prompt()?;

    let mut query: Option<String> = None;
    match action {
        "search location" => {
            let text = Text::new("Location:")
                .with_placeholder("city, zip code, or IP")
                .prompt()?;
            shell.search.input.set_text(text);
            shell.search.input.submit(|q| query = Some(q.to_string()));
        }
        "use current position" => {
            shell
                .search
                .use_current_position(&NoDevicePosition, |q| query = Some(q.to_string()));
        }
        _ => return Ok(()),
    }

    if let Some(query) = query {
        shell.current.search(client, &query).await;
        match (shell.current.data(), shell.current.error()) {
            (Some(data), _) => render::current(data),
            (None, Some(message)) => println!("error: {message}"),
            _ => {}
        }
    }

    Ok(())
}

async fn historical_tab(shell: &mut Shell, client: &WeatherstackClient) -> anyhow::Result<()> {
    if let Some(data) = shell.historical.data() {
        render::historical(data);
    }

    let location = Text::new("Location:")
        .with_initial_value(&shell.historical.location)
        .prompt()?;
    let date = CustomType::<NaiveDate>::new("Date (YYYY-MM-DD):")
        .with_error_message("Enter a date as YYYY-MM-DD")
        .prompt()?;

    shell.historical.location = location;
    shell.historical.date = Some(date);

    if shell.historical.search(client).await {
        match (shell.historical.data(), shell.historical.error()) {
            (Some(data), _) => render::historical(data),
            (None, Some(message)) => println!("error: {message}"),
            _ => {}
        }
    }

    Ok(())
}

async fn marine_tab(shell: &mut Shell, client: &WeatherstackClient) -> anyhow::Result<()> {
    if let Some(data) = shell.marine.data() {
        render::marine(data);
    }

    let lat = Text::new("Latitude:")
        .with_placeholder("e.g. 40.71")
        .with_initial_value(&shell.marine.lat)
        .prompt()?;
    let lon = Text::new("Longitude:")
        .with_placeholder("e.g. -74.01")
        .with_initial_value(&shell.marine.lon)
        .prompt()?;

    shell.marine.lat = lat;
    shell.marine.lon = lon;

    if shell.marine.search(client).await {
        match (shell.marine.data(), shell.marine.error()) {
            (Some(data), _) => render::marine(data),
            (None, Some(message)) => println!("error: {message}"),
            _ => {}
        }
    }

    Ok(())
}
