use std::error;
use std::fmt;

use simulator::{BuildError, ConfigError, ReplayError, SelectionError};

#[derive(Debug)]
pub enum CliError {
    Arguments(String),
    Config(ConfigError),
    GoogleMaps(google_maps::ApiError),
    Tracking(tracking::ApiError),
    Selection(SelectionError),
    Build(BuildError),
    Replay(ReplayError),
}

impl error::Error for CliError {}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Arguments(e) => write!(f, "invalid arguments: {}", e),
            CliError::Config(e) => write!(f, "invalid configuration: {}", e),
            CliError::GoogleMaps(e) => write!(f, "route lookup failed: {}", e),
            CliError::Tracking(e) => write!(f, "tracking service: {}", e),
            CliError::Selection(e) => write!(f, "no route selected: {}", e),
            CliError::Build(e) => write!(f, "route can not be driven: {}", e),
            CliError::Replay(e) => write!(f, "{}", e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<google_maps::ApiError> for CliError {
    fn from(e: google_maps::ApiError) -> Self {
        CliError::GoogleMaps(e)
    }
}

impl From<tracking::ApiError> for CliError {
    fn from(e: tracking::ApiError) -> Self {
        CliError::Tracking(e)
    }
}

impl From<SelectionError> for CliError {
    fn from(e: SelectionError) -> Self {
        CliError::Selection(e)
    }
}

impl From<BuildError> for CliError {
    fn from(e: BuildError) -> Self {
        CliError::Build(e)
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        CliError::Replay(e)
    }
}
