use google_maps::{
    directions::get_directions, ApiError, GoogleMapsClient, GoogleMapsCredentials,
};
use serde_json::json;
use simulator::RouteSource;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> GoogleMapsClient {
    GoogleMapsClient::with_base_url(&GoogleMapsCredentials::new("secret"), &server.uri())
}

fn step(points: &str, duration: u32, distance: u32) -> serde_json::Value {
    json!({
        "distance": { "text": "", "value": distance },
        "duration": { "text": "", "value": duration },
        "polyline": { "points": points },
        "travel_mode": "DRIVING"
    })
}

#[tokio::test]
async fn routes_are_returned_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .and(query_param("origin", "Aalborg"))
        .and(query_param("destination", "Aarhus C"))
        .and(query_param("mode", "driving"))
        .and(query_param("alternatives", "true"))
        .and(query_param("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "routes": [
                {
                    "summary": "E45",
                    "legs": [{
                        "distance": { "text": "118 km", "value": 118000 },
                        "duration": { "text": "1 hour", "value": 4200 },
                        "steps": [
                            step("_p~iF~ps|U_ulLnnqC", 1200, 30000),
                            step("_ulLnnqC_mqNvxq`@", 3000, 88000)
                        ]
                    }]
                },
                {
                    "summary": "Rute 180",
                    "legs": [{
                        "distance": { "text": "125 km", "value": 125000 },
                        "duration": { "text": "2 hours", "value": 6000 },
                        "steps": [step("_p~iF~ps|U_mqNvxq`@", 6000, 125000)]
                    }]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let routes = client(&server)
        .lookup_route("Aalborg", "Aarhus C", true)
        .await
        .unwrap();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].summary, "E45");
    assert_eq!(routes[0].distance(), 118000.0);
    assert_eq!(routes[0].duration(), 4200.0);
    assert_eq!(routes[0].legs[0].steps[1].polyline, "_ulLnnqC_mqNvxq`@");
    assert_eq!(routes[1].summary, "Rute 180");
}

#[tokio::test]
async fn zero_results_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "routes": [] })),
        )
        .mount(&server)
        .await;

    let routes = get_directions(&client(&server), "Aalborg", "New York", false)
        .await
        .unwrap();
    assert!(routes.is_empty());
}

#[tokio::test]
async fn refused_request_reports_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        })))
        .mount(&server)
        .await;

    let error = get_directions(&client(&server), "Aalborg", "Aarhus", true)
        .await
        .unwrap_err();
    match &error {
        ApiError::Status { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        error.to_string(),
        "Directions API returned REQUEST_DENIED: The provided API key is invalid."
    );
}

#[tokio::test]
async fn http_failure_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let error = get_directions(&client(&server), "Aalborg", "Aarhus", true)
        .await
        .unwrap_err();
    match error {
        ApiError::InvalidResponse {
            status_code,
            url,
            response,
        } => {
            assert_eq!(status_code, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(url, format!("{}/maps/api/directions/json", server.uri()));
            // the key must not leak into error messages
            assert!(!url.contains("secret"));
            assert_eq!(response.as_deref(), Some("backend down"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn requests_go_through_the_proxy() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .and(query_param("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "routes": []
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    // the host itself does not resolve, only the proxy can answer
    let credentials = GoogleMapsCredentials::new("secret").with_proxy(Some(proxy.uri()));
    let client = GoogleMapsClient::with_base_url(&credentials, "http://maps.invalid");
    let routes = get_directions(&client, "Aalborg", "Aarhus", false)
        .await
        .unwrap();
    assert!(routes.is_empty());
}
