use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// How the duration of a step is spread over its polyline points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingStrategy {
    /// Points are evenly spaced in time, regardless of their distance.
    #[default]
    Uniform,
    /// Time is proportional to the great-circle distance covered within the
    /// step. Steps of zero length fall back to uniform spacing.
    DistanceWeighted,
}

impl fmt::Display for TimingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimingStrategy::Uniform => write!(f, "uniform"),
            TimingStrategy::DistanceWeighted => write!(f, "distance-weighted"),
        }
    }
}

impl FromStr for TimingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(TimingStrategy::Uniform),
            "distance-weighted" => Ok(TimingStrategy::DistanceWeighted),
            other => Err(ConfigError::UnknownTiming(other.to_owned())),
        }
    }
}

/// Everything the simulator needs besides the route itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// simulated seconds per wall-clock second
    pub speed_factor: f64,
    /// minimum wall-clock time between two samples
    pub cadence: Duration,
    /// number of upcoming trajectory points used for the speed estimate
    pub lookahead_steps: usize,
    pub timing: TimingStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            cadence: Duration::from_secs(1),
            lookahead_steps: 4,
            timing: TimingStrategy::Uniform,
        }
    }
}

impl SimulationConfig {
    /// Cadence from fractional seconds as given on the command line.
    pub fn cadence_from_secs(seconds: f64) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(seconds).map_err(|_| ConfigError::Cadence(seconds))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ConfigError::SpeedFactor(self.speed_factor));
        }
        Ok(())
    }
}
