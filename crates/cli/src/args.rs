use clap::Parser;
use google_maps::GoogleMapsCredentials;
use simulator::{SimulationConfig, TimingStrategy};
use tracking::UserCredentials;

use crate::error::CliError;

/// Drives a simulated vehicle along a Google Maps route and reports its
/// position, speed and fuel level to the tracking service.
#[derive(Parser, Debug)]
#[command(name = "trip-simulator", version)]
pub struct Args {
    /// URL of the server
    #[arg(long, default_value = "http://sw708e16.cs.aau.dk")]
    pub server: String,

    /// If not supplied a new user will be made
    #[arg(long, num_args = 2, value_names = ["NAME", "PASSWORD"])]
    pub user: Option<Vec<String>>,

    /// Used to make new user
    #[arg(
        long,
        num_args = 2,
        value_names = ["NAME", "PASSWORD"],
        default_values = ["deadpool", "hunter2"]
    )]
    pub superuser: Vec<String>,

    /// Delay between POSTing waypoints, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Speed factor
    #[arg(long, default_value_t = 1.0)]
    pub x_factor: f64,

    /// Coordinates or address of starting point
    #[arg(long)]
    pub start: String,

    /// Coordinates or address of ending point
    #[arg(long)]
    pub end: String,

    /// Disable user input (force choices to first)
    #[arg(long)]
    pub non_interactive: bool,

    /// Number of data steps to include in speed calculation
    #[arg(long, default_value_t = 4)]
    pub calc_speed_steps: usize,

    /// How step durations are spread over the points of a step
    #[arg(long, default_value_t = TimingStrategy::Uniform)]
    pub timing: TimingStrategy,

    /// Google Maps API key [default: $GOOGLE_MAPS_API_KEY]
    #[arg(long)]
    pub google_maps_api_key: Option<String>,

    /// Proxy for Google Maps requests [default: $GOOGLE_MAPS_PROXY]
    #[arg(long, value_name = "URL")]
    pub google_maps_proxy: Option<String>,
}

fn credentials(option: &str, values: &[String]) -> Result<UserCredentials, CliError> {
    match values {
        [name, password] => Ok(UserCredentials::new(name, password)),
        _ => Err(CliError::Arguments(format!(
            "--{option} expects a name and a password"
        ))),
    }
}

impl Args {
    pub fn simulation_config(&self) -> Result<SimulationConfig, CliError> {
        let config = SimulationConfig {
            speed_factor: self.x_factor,
            cadence: SimulationConfig::cadence_from_secs(self.delay)?,
            lookahead_steps: self.calc_speed_steps,
            timing: self.timing,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn user(&self) -> Result<Option<UserCredentials>, CliError> {
        self.user
            .as_deref()
            .map(|values| credentials("user", values))
            .transpose()
    }

    pub fn superuser(&self) -> Result<UserCredentials, CliError> {
        credentials("superuser", &self.superuser)
    }

    /// Explicit options win over the environment.
    pub fn google_maps_credentials(&self) -> Result<GoogleMapsCredentials, CliError> {
        let credentials = match &self.google_maps_api_key {
            Some(api_key) if api_key.is_empty() => {
                return Err(google_maps::ApiError::MissingApiKey.into())
            }
            Some(api_key) => GoogleMapsCredentials::new(api_key),
            None => GoogleMapsCredentials::env()?,
        };
        Ok(match &self.google_maps_proxy {
            Some(proxy) => credentials.with_proxy(Some(proxy.clone())),
            None => credentials,
        })
    }
}
