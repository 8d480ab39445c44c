use std::error::Error;

use async_trait::async_trait;
use model::DataPoint;

/// Receives the telemetry of one route. Implementations are bound to the
/// route they report for.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    async fn create_datapoint(
        &self,
        data_points: &[DataPoint],
        timestamp_ms: i64,
    ) -> Result<(), Self::Error>;

    async fn create_waypoint(
        &self,
        latitude: f64,
        longitude: f64,
        timestamp_ms: i64,
    ) -> Result<(), Self::Error>;
}
