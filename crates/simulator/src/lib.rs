use std::error;
use std::fmt;
use std::io;

use model::TrajectoryError;
use utility::polyline::DecodeError;

pub mod builder;
pub mod chooser;
pub mod clock;
pub mod config;
pub mod progress;
pub mod replay;
pub mod sampler;
pub mod sink;
pub mod source;

pub use builder::build_trajectory;
pub use chooser::{select_route, FirstRouteChooser, RouteChooser, TerminalRouteChooser};
pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::{SimulationConfig, TimingStrategy};
pub use replay::{Replay, ReplayOutcome, ReplaySummary};
pub use sink::TelemetrySink;
pub use source::RouteSource;

/// A route that can not be turned into a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    EmptyRoute,
    DegenerateStep {
        leg: usize,
        step: usize,
        points: usize,
    },
    InvalidDuration {
        leg: usize,
        step: usize,
        duration: f64,
    },
    Polyline {
        leg: usize,
        step: usize,
        error: DecodeError,
    },
    Trajectory(TrajectoryError),
}

impl error::Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildError::EmptyRoute => write!(f, "route has no steps"),
            BuildError::DegenerateStep { leg, step, points } => write!(
                f,
                "step {} of leg {} has {} point(s), at least 2 are needed",
                step, leg, points
            ),
            BuildError::InvalidDuration {
                leg,
                step,
                duration,
            } => write!(
                f,
                "step {} of leg {} has an invalid duration of {} s",
                step, leg, duration
            ),
            BuildError::Polyline { leg, step, error } => {
                write!(f, "step {} of leg {}: {}", step, leg, error)
            }
            BuildError::Trajectory(e) => write!(f, "{}", e),
        }
    }
}

impl From<TrajectoryError> for BuildError {
    fn from(e: TrajectoryError) -> Self {
        BuildError::Trajectory(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    SpeedFactor(f64),
    Cadence(f64),
    UnknownTiming(String),
}

impl error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::SpeedFactor(factor) => {
                write!(f, "speed factor must be positive, got {}", factor)
            }
            ConfigError::Cadence(seconds) => write!(
                f,
                "delay must be a non-negative number of seconds, got {}",
                seconds
            ),
            ConfigError::UnknownTiming(name) => write!(
                f,
                "unknown timing strategy '{}', expected 'uniform' or 'distance-weighted'",
                name
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionKind {
    Datapoint,
    Waypoint,
}

impl fmt::Display for EmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmissionKind::Datapoint => write!(f, "datapoint"),
            EmissionKind::Waypoint => write!(f, "waypoint"),
        }
    }
}

#[derive(Debug)]
pub enum ReplayError {
    Config(ConfigError),
    Emission {
        kind: EmissionKind,
        source: Box<dyn error::Error + Send + Sync>,
    },
}

impl error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ReplayError::Config(e) => Some(e),
            ReplayError::Emission { source, .. } => Some(source.as_ref()),
        }
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplayError::Config(e) => write!(f, "invalid configuration: {}", e),
            ReplayError::Emission { kind, source } => {
                write!(f, "{} NOT created: {}", kind, source)
            }
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        ReplayError::Config(e)
    }
}

#[derive(Debug)]
pub enum SelectionError {
    NoRoutes,
    OutOfRange { index: usize, options: usize },
    InputClosed,
    Io(io::Error),
}

impl error::Error for SelectionError {}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::NoRoutes => write!(f, "no route found"),
            SelectionError::OutOfRange { index, options } => write!(
                f,
                "route {} chosen, but there are only {} alternatives",
                index, options
            ),
            SelectionError::InputClosed => {
                write!(f, "input closed before a route was chosen")
            }
            SelectionError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<io::Error> for SelectionError {
    fn from(e: io::Error) -> Self {
        SelectionError::Io(e)
    }
}
