use async_trait::async_trait;
use model::Route;
use simulator::RouteSource;

use crate::{client::GoogleMapsClient, response::DirectionsResponse, ApiError};

pub const DIRECTIONS_ENDPOINT: &str = "maps/api/directions/json";

/// Driving directions from `origin` to `destination`, best route first.
///
/// `ZERO_RESULTS` is not an error, it yields an empty list. Every other
/// status besides `OK` is reported as [`ApiError::Status`].
pub async fn get_directions(
    client: &GoogleMapsClient,
    origin: &str,
    destination: &str,
    alternatives: bool,
) -> Result<Vec<Route>, ApiError> {
    /* fetch data */
    let response: DirectionsResponse = client
        .get(
            DIRECTIONS_ENDPOINT,
            &[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("alternatives", if alternatives { "true" } else { "false" }),
            ],
        )
        .await?;

    match response.status.as_str() {
        "OK" => {
            log::info!(
                "Found {} route(s) from '{}' to '{}'.",
                response.routes.len(),
                origin,
                destination
            );
            Ok(response.routes.into_iter().map(Route::from).collect())
        }
        "ZERO_RESULTS" => {
            log::warn!("No route from '{}' to '{}'.", origin, destination);
            Ok(vec![])
        }
        _ => Err(ApiError::Status {
            status: response.status,
            message: response.error_message,
        }),
    }
}

#[async_trait]
impl RouteSource for GoogleMapsClient {
    type Error = ApiError;

    async fn lookup_route(
        &self,
        start: &str,
        end: &str,
        alternatives: bool,
    ) -> Result<Vec<Route>, Self::Error> {
        get_directions(self, start, end, alternatives).await
    }
}
