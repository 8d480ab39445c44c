use std::error::Error;

use async_trait::async_trait;
use model::Route;

/// Looks up driving routes between two places.
#[async_trait]
pub trait RouteSource {
    type Error: Error + Send + Sync + 'static;

    /// `start` and `end` may be addresses or `"lat,lon"` pairs. With
    /// `alternatives` the source may return more than one route, best first.
    async fn lookup_route(
        &self,
        start: &str,
        end: &str,
        alternatives: bool,
    ) -> Result<Vec<Route>, Self::Error>;
}
