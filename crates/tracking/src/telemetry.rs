use async_trait::async_trait;
use model::DataPoint;
use simulator::TelemetrySink;

use crate::{
    client::{AuthToken, TrackingClient},
    dto::ResourceId,
    ApiError,
};

/// Reports the samples of one route to the tracking service.
#[derive(Clone)]
pub struct RouteTelemetry {
    client: TrackingClient,
    token: AuthToken,
    route_id: ResourceId,
}

impl RouteTelemetry {
    pub fn new(client: TrackingClient, token: AuthToken, route_id: ResourceId) -> Self {
        Self {
            client,
            token,
            route_id,
        }
    }
}

#[async_trait]
impl TelemetrySink for RouteTelemetry {
    type Error = ApiError;

    async fn create_datapoint(
        &self,
        data_points: &[DataPoint],
        timestamp_ms: i64,
    ) -> Result<(), Self::Error> {
        self.client
            .create_datapoint(&self.token, &self.route_id, data_points, timestamp_ms)
            .await
    }

    async fn create_waypoint(
        &self,
        latitude: f64,
        longitude: f64,
        timestamp_ms: i64,
    ) -> Result<(), Self::Error> {
        self.client
            .create_waypoint(&self.token, &self.route_id, latitude, longitude, timestamp_ms)
            .await
    }
}
