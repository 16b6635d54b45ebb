use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use weather_core::{
    Config, ForecastClient, ForecastRequest, GeocodeClient, LocationQuery, RenderOptions,
    UnitSystem, location,
    render::{render_current, render_daily},
};
use weather_server::{DEFAULT_PORT, ProxyConfig, ServeOptions};

use crate::output::Printer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    disable_version_flag = true,
    about = "Weather forecast via Dark Sky"
)]
pub struct Cli {
    /// Location to get the weather for (address, city or zipcode).
    #[arg(short, long)]
    pub location: Option<String>,

    /// Units for the forecast: auto, us, si, ca, uk, uk2, metric or imperial.
    #[arg(short, long)]
    pub units: Option<String>,

    /// Number of days of forecast to show after today.
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Don't print any alerts.
    #[arg(long)]
    pub ignore_alerts: bool,

    /// Don't print the weather icon.
    #[arg(long)]
    pub hide_icon: bool,

    /// Skip the hourly forecast.
    #[arg(long)]
    pub no_forecast: bool,

    /// Print the raw forecast as JSON.
    #[arg(long)]
    pub json: bool,

    /// Locate from the SSH client's IP address (`SSH_CONNECTION`).
    #[arg(short, long)]
    pub client: bool,

    /// Weather API server URI.
    #[arg(short, long)]
    pub server: Option<String>,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the forecast and geocode proxy server.
    Server(ServerArgs),

    /// Interactively store default server, units and days.
    Configure,
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// darksky.net API key.
    #[arg(long = "darksky-apikey", env = "DARKSKY_API_KEY", hide_env_values = true)]
    pub darksky_api_key: Option<String>,

    /// Google Geocode API key.
    #[arg(long = "geocode-apikey", env = "GEOCODE_API_KEY", hide_env_values = true)]
    pub geocode_api_key: Option<String>,

    /// Port for the server to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// TLS certificate path.
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// TLS key path.
    #[arg(long)]
    pub key: Option<PathBuf>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.command {
            Some(Command::Server(_)) => "weather_server=info,weather_core=info,warp=info",
            _ => "weather_cli=warn,weather_core=warn",
        }
    }

    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Some(Command::Server(args)) => serve(args, &config).await,
            Some(Command::Configure) => configure(config),
            None => {
                self.apply_overrides(&mut config)?;
                let query = LocationQuery::from_env(self.location.clone(), self.client);
                self.show(&config, &query, &mut Printer::stdio()).await
            }
        }
    }

    /// Flags win over the config file.
    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(server) = &self.server {
            config.set_server(server)?;
        }
        if let Some(units) = &self.units {
            config.set_units(UnitSystem::parse(units))?;
        }
        if self.days.is_some() {
            config.days = self.days;
        }
        Ok(())
    }

    async fn show<O: Write, E: Write>(
        &self,
        config: &Config,
        query: &LocationQuery,
        printer: &mut Printer<O, E>,
    ) -> Result<()> {
        let geocoder = GeocodeClient::new(config.server_uri(), config.geoip_uri())?;

        let resolution = location::resolve(&geocoder, query)
            .await
            .context("Failed to determine your location")?;
        if let Some(warning) = resolution.warning {
            printer.warning(warning)?;
        }

        let units = config.unit_system();
        let mut request = ForecastRequest::new(resolution.geocode.coordinate(), units);
        if self.no_forecast {
            request = request.exclude("hourly");
        }

        let forecast = ForecastClient::new(config.server_uri())?
            .get(&request)
            .await
            .context("Failed to get the forecast")?;

        if self.json {
            printer.text(&serde_json::to_string(&forecast)?)?;
            return Ok(());
        }

        let options =
            RenderOptions { hide_icon: self.hide_icon, ignore_alerts: self.ignore_alerts, units };
        printer.lines(&render_current(&forecast, &resolution.geocode, options))?;

        let days = config.days.unwrap_or(0) as usize;
        if days > 0 {
            printer.lines(&render_daily(&forecast, days, units))?;
        }

        Ok(())
    }
}

async fn serve(args: ServerArgs, config: &Config) -> Result<()> {
    let darksky = args
        .darksky_api_key
        .or_else(|| config.proxy.darksky_api_key.clone())
        .unwrap_or_default();
    let geocode = args
        .geocode_api_key
        .or_else(|| config.proxy.geocode_api_key.clone())
        .unwrap_or_default();

    let options = ServeOptions { port: args.port, cert: args.cert, key: args.key };
    weather_server::serve(ProxyConfig::new(darksky, geocode), options).await
}

fn configure(mut config: Config) -> Result<()> {
    let server = Text::new("Weather API server:")
        .with_default(config.server_uri())
        .prompt()?;
    config.set_server(&server)?;

    let systems = UnitSystem::all().to_vec();
    let current = config.unit_system();
    let cursor = systems.iter().position(|s| *s == current).unwrap_or(0);
    let units = Select::new("Default units:", systems).with_starting_cursor(cursor).prompt()?;
    config.set_units(units)?;

    let days = CustomType::<u32>::new("Days of forecast to show:")
        .with_default(config.days.unwrap_or(0))
        .with_error_message("Please enter a whole number of days")
        .prompt()?;
    config.days = Some(days);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
