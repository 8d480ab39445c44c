use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a route on the tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteState {
    Created,
    Active,
    Complete,
}

impl fmt::Display for RouteState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteState::Created => write!(f, "CREATED"),
            RouteState::Active => write!(f, "ACTIVE"),
            RouteState::Complete => write!(f, "COMPLETE"),
        }
    }
}
