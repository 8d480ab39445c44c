use model::{DataPoint, RouteState};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    dto::{
        Created, CreatedUser, Datapoint, ErrorBody, NewRoute, NewUser, NewVehicle,
        ResourceId, RouteStateUpdate, TokenResponse, UserCredentials, Waypoint,
    },
    ApiError, SERVICES_PATH,
};

/// Session token handed out by `/auth`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn header(&self) -> String {
        format!("Sleepy token={}", self.0)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Section header used in the provisioning log.
pub fn banner(title: &str) -> String {
    format!("--{:=^50}--", format!(" {title} "))
}

/// Client for the vehicle tracking services.
#[derive(Clone)]
pub struct TrackingClient {
    base_url: String,
    client: reqwest::Client,
}

impl TrackingClient {
    /// `server` is the host, the services path is appended to it.
    pub fn new(server: &str) -> Result<Self, ApiError> {
        let base_url = reqwest::Url::parse(server)
            .and_then(|url| url.join(SERVICES_PATH))
            .map_err(|e| ApiError::InvalidUrl(format!("{server}: {e}")))?;
        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<String, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut request = self.client.request(method, &url).json(body);
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, token.header());
        }
        let response = request.send().await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(response.text().await?),
            other => {
                let response = response.text().await.ok().and_then(|text| {
                    match serde_json::from_str::<ErrorBody>(&text) {
                        Ok(ErrorBody {
                            message: Some(message),
                        }) => Some(message),
                        _ if text.is_empty() => None,
                        _ => Some(text),
                    }
                });
                Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response,
                })
            }
        }
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(method, endpoint, token, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn authenticate(&self, user: &UserCredentials) -> Result<AuthToken, ApiError> {
        let response: TokenResponse = self
            .send_json(reqwest::Method::POST, "auth", None, user)
            .await?;
        log::info!("{}\n{}", banner("User Authenticated"), user.username);
        Ok(AuthToken(response.token))
    }

    /// Creates a user. Requires the token of a user allowed to do so.
    pub async fn create_user(
        &self,
        token: &AuthToken,
        user: &NewUser,
    ) -> Result<CreatedUser, ApiError> {
        let created: CreatedUser = self
            .send_json(reqwest::Method::POST, "user", Some(token), user)
            .await?;
        log::info!("{}\n{:#?}", banner("New User Created"), created);
        Ok(created)
    }

    pub async fn create_vehicle(
        &self,
        token: &AuthToken,
        vehicle: &NewVehicle,
    ) -> Result<ResourceId, ApiError> {
        let created: Created = self
            .send_json(reqwest::Method::POST, "vehicle", Some(token), vehicle)
            .await?;
        log::info!(
            "{}\n{} {} ({}), VIN {}, id {}",
            banner("Vehicle Created"),
            vehicle.make,
            vehicle.model,
            vehicle.vintage,
            vehicle.vin,
            created.id
        );
        Ok(created.id)
    }

    /// Creates a route for `vehicle_id` in state [`RouteState::Created`].
    pub async fn create_route(
        &self,
        token: &AuthToken,
        vehicle_id: &ResourceId,
    ) -> Result<ResourceId, ApiError> {
        let route = NewRoute {
            vehicleid: vehicle_id.clone(),
            route_state: RouteState::Created,
        };
        let created: Created = self
            .send_json(reqwest::Method::POST, "route", Some(token), &route)
            .await?;
        log::info!("{}\nid {}", banner("Route Created"), created.id);
        Ok(created.id)
    }

    pub async fn transition_route_state(
        &self,
        token: &AuthToken,
        route_id: &ResourceId,
        state: RouteState,
    ) -> Result<(), ApiError> {
        self.send(
            reqwest::Method::PUT,
            &format!("route/{route_id}"),
            Some(token),
            &RouteStateUpdate { route_state: state },
        )
        .await?;
        log::info!("{}\nroute {} is {}", banner("Route State Changed"), route_id, state);
        Ok(())
    }

    pub async fn create_waypoint(
        &self,
        token: &AuthToken,
        route_id: &ResourceId,
        latitude: f64,
        longitude: f64,
        timestamp_ms: i64,
    ) -> Result<(), ApiError> {
        let waypoint = Waypoint {
            latitude,
            longitude,
            timestamp: timestamp_ms,
        };
        self.send(
            reqwest::Method::POST,
            &format!("route/{route_id}/waypoint"),
            Some(token),
            &waypoint,
        )
        .await?;
        Ok(())
    }

    pub async fn create_datapoint(
        &self,
        token: &AuthToken,
        route_id: &ResourceId,
        data_points: &[DataPoint],
        timestamp_ms: i64,
    ) -> Result<(), ApiError> {
        let datapoint = Datapoint {
            vehicle_data_points: data_points.to_vec(),
            timestamp: timestamp_ms,
        };
        self.send(
            reqwest::Method::POST,
            &format!("route/{route_id}/datapoint"),
            Some(token),
            &datapoint,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_path_replaces_the_server_path() {
        let client = TrackingClient::new("http://sw708e16.cs.aau.dk").unwrap();
        assert_eq!(client.base_url(), "http://sw708e16.cs.aau.dk/services-1.0.0");
        let client = TrackingClient::new("http://localhost:8080/other/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/services-1.0.0");
    }

    #[test]
    fn server_must_be_a_url() {
        assert!(matches!(
            TrackingClient::new("sw708e16"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn token_is_sent_in_sleepy_scheme() {
        let token = AuthToken::new("abc");
        assert_eq!(token.header(), "Sleepy token=abc");
        assert_eq!(format!("{:?}", token), "AuthToken(..)");
    }

    #[test]
    fn banner_is_centered() {
        let line = banner("DRIVING");
        assert_eq!(line.len(), 54);
        assert!(line.starts_with("--====="));
        assert!(line.contains(" DRIVING "));
    }
}
