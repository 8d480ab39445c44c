use std::env;

use serde::{Deserialize, Serialize};

use crate::ApiError;

pub const GOOGLE_MAPS_API_URL: &str = "https://maps.googleapis.com";

pub const API_KEY_VARIABLE: &str = "GOOGLE_MAPS_API_KEY";

pub const PROXY_VARIABLE: &str = "GOOGLE_MAPS_PROXY";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleMapsCredentials {
    pub api_key: String,
    pub proxy: Option<String>,
}

impl GoogleMapsCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            proxy: None,
        }
    }

    /// Reads the key from `GOOGLE_MAPS_API_KEY` and an optional proxy URL
    /// from `GOOGLE_MAPS_PROXY`.
    pub fn env() -> Result<Self, ApiError> {
        let api_key = match env::var(API_KEY_VARIABLE) {
            Ok(api_key) if !api_key.is_empty() => api_key,
            _ => return Err(ApiError::MissingApiKey),
        };
        let proxy = env::var(PROXY_VARIABLE).ok().filter(|proxy| !proxy.is_empty());
        Ok(Self::new(api_key).with_proxy(proxy))
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }
}

pub struct GoogleMapsClient {
    pub credentials: GoogleMapsCredentials,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(credentials: &GoogleMapsCredentials) -> Self {
        Self::with_base_url(credentials, GOOGLE_MAPS_API_URL)
    }

    /// Client talking to another host, e.g. a mock server.
    pub fn with_base_url(credentials: &GoogleMapsCredentials, base_url: &str) -> Self {
        Self {
            credentials: credentials.clone(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Fetch data from an endpoint using this client. The API key is added to
    /// `query`.
    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        /* build a new http client with optional proxy */
        let client = if let Some(proxy_url) = &self.credentials.proxy {
            log::debug!("Requesting Endpoint '{endpoint}' using proxy '{proxy_url}'.");
            reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(proxy_url)?)
                .build()?
        } else {
            log::debug!("Requesting Endpoint '{endpoint}'.");
            reqwest::Client::new()
        };

        /* perform get-request */
        let url = format!("{}/{endpoint}", self.base_url);
        let response = client
            .get(&url)
            .query(query)
            .query(&[("key", self.credentials.api_key.as_str())])
            .send()
            .await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: None,
                }),
            },
        }
    }
}
