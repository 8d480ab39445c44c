use serde::{Deserialize, Serialize};

/// `{ "text": "1.2 km", "value": 1234 }`
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsStep {
    pub polyline: EncodedPolyline,
    pub duration: TextValue,
    pub distance: TextValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub steps: Vec<DirectionsStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

/// Body of `maps/api/directions/json`. Only the fields used for driving
/// simulation are kept.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `NOT_FOUND`, `REQUEST_DENIED`, ...
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

impl From<DirectionsStep> for model::Step {
    fn from(step: DirectionsStep) -> Self {
        Self {
            polyline: step.polyline.points,
            duration: step.duration.value,
            distance: step.distance.value,
        }
    }
}

impl From<DirectionsLeg> for model::Leg {
    fn from(leg: DirectionsLeg) -> Self {
        Self {
            steps: leg.steps.into_iter().map(model::Step::from).collect(),
            duration: leg.duration.value,
            distance: leg.distance.value,
        }
    }
}

impl From<DirectionsRoute> for model::Route {
    fn from(route: DirectionsRoute) -> Self {
        Self {
            summary: route.summary,
            legs: route.legs.into_iter().map(model::Leg::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_keeps_values_of_legs_and_steps() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{
                "geocoded_waypoints": [],
                "routes": [{
                    "summary": "Hobrovej",
                    "copyrights": "Map data ©2016",
                    "legs": [{
                        "distance": { "text": "1.0 km", "value": 1000 },
                        "duration": { "text": "2 mins", "value": 100 },
                        "steps": [{
                            "distance": { "text": "1.0 km", "value": 1000 },
                            "duration": { "text": "2 mins", "value": 100 },
                            "polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                            "travel_mode": "DRIVING"
                        }]
                    }]
                }],
                "status": "OK"
            }"#,
        )
        .unwrap();

        assert_eq!(response.status, "OK");
        assert!(response.error_message.is_none());
        let route = model::Route::from(response.routes[0].clone());
        assert_eq!(route.summary, "Hobrovej");
        assert_eq!(route.distance(), 1000.0);
        assert_eq!(route.duration(), 100.0);
        assert_eq!(route.legs[0].steps[0].polyline, "_p~iF~ps|U_ulLnnqC");
    }

    #[test]
    fn refused_request_has_no_routes() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{ "error_message": "The provided API key is invalid.", "routes": [], "status": "REQUEST_DENIED" }"#,
        )
        .unwrap();
        assert_eq!(response.status, "REQUEST_DENIED");
        assert_eq!(
            response.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
        assert!(response.routes.is_empty());
    }
}
