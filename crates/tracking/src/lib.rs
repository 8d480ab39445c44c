use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod dto;
pub mod provisioning;
pub mod telemetry;

pub use client::{AuthToken, TrackingClient};
pub use dto::{ResourceId, UserCredentials};
pub use provisioning::{provision, Provisioned};
pub use telemetry::RouteTelemetry;

/// Path under which the tracking services are deployed on the server.
pub const SERVICES_PATH: &str = "/services-1.0.0";

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidUrl(String),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        /// `message` of the error body, or the raw body if it has none
        response: Option<String>,
    },
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidUrl(url) => write!(f, "Invalid server URL: {}", url),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response({}) {}", status_code, url),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}
