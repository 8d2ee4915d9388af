//! Integration tests for `WeatherstackClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use weatherglass_core::{Config, WeatherApi, WeatherError, WeatherstackClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> WeatherstackClient {
    WeatherstackClient::new(&Config::new("test-key").with_base_url(base_url))
}

#[tokio::test]
async fn current_sends_contract_params_and_parses_response() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "request": { "type": "City", "query": "Boston, United States of America", "language": "en", "unit": "m" },
        "location": {
            "name": "Boston", "country": "United States of America",
            "region": "Massachusetts", "lat": "42.358", "lon": "-71.060",
            "localtime": "2024-06-01 14:32"
        },
        "current": {
            "observation_time": "06:32 PM",
            "temperature": 18, "weather_descriptions": ["Sunny"],
            "weather_icons": ["https://cdn.example/sunny.png"],
            "wind_speed": 9, "wind_dir": "NW", "pressure": 1015,
            "precip": 0, "humidity": 52, "cloudcover": 10,
            "feelslike": 17, "uv_index": 6, "visibility": 16
        }
    });

    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("query", "Boston"))
        .and(query_param("units", "m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.current("Boston").await.expect("should parse current weather");

    assert_eq!(response.current.temperature, 18.0);
    assert_eq!(response.location.name, "Boston");
    assert_eq!(response.current.description(), Some("Sunny"));
    assert_eq!(response.current.wind_dir, "NW");
}

#[tokio::test]
async fn current_query_text_is_url_encoded() {
    let server = MockServer::start().await;

    // wiremock matches against the decoded value, proving the space survived
    // the query-string round trip.
    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("query", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "New York" },
            "current": { "temperature": 21 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.current("New York").await.expect("should match encoded query");

    assert_eq!(response.location.name, "New York");
}

#[tokio::test]
async fn historical_sends_date_and_hourly_params() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "location": { "name": "Paris", "country": "France" },
        "historical": {
            "2024-01-01": {
                "date": "2024-01-01",
                "date_epoch": 1704067200,
                "astro": {
                    "sunrise": "08:44 AM", "sunset": "05:04 PM",
                    "moonrise": "09:13 PM", "moonset": "11:07 AM",
                    "moon_phase": "Waning Gibbous", "moon_illumination": 73
                },
                "mintemp": 2, "maxtemp": 8, "avgtemp": 5,
                "totalsnow": 0, "sunhour": 6.5, "uv_index": 1,
                "hourly": [
                    { "time": "0", "temperature": 3, "wind_speed": 11,
                      "weather_descriptions": ["Overcast"],
                      "weather_icons": ["https://cdn.example/overcast.png"],
                      "humidity": 88, "precip": 0.1 },
                    { "time": "300", "temperature": 2, "wind_speed": 10,
                      "weather_descriptions": ["Mist"],
                      "weather_icons": ["https://cdn.example/mist.png"],
                      "humidity": 91, "precip": 0 }
                ]
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/historical"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("query", "Paris"))
        .and(query_param("historical_date", "2024-01-01"))
        .and(query_param("hourly", "1"))
        .and(query_param("units", "m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let response = client.historical("Paris", date).await.expect("should parse historical");

    let day = response.first_day().expect("single keyed record");
    assert_eq!(day.mintemp, 2.0);
    assert_eq!(day.maxtemp, 8.0);
    assert_eq!(day.astro.as_ref().unwrap().moon_phase, "Waning Gibbous");
    assert_eq!(day.hourly.len(), 2);
    assert_eq!(day.hourly[0].time, "0");
    assert_eq!(day.hourly[1].humidity, 91.0);
}

#[tokio::test]
async fn marine_joins_coordinates_into_one_query_param() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "request": { "type": "LatLon", "query": "Lat 40.71 and Lon -74.01" },
        "nearest_area": [{
            "latitude": "40.700", "longitude": "-74.000",
            "region": [{ "value": "New York" }],
            "country": [{ "value": "United States of America" }]
        }],
        "weather": [{
            "date": "2024-06-01", "maxtempC": "22", "mintempC": "16",
            "hourly": [{
                "time": "0", "tempC": "17", "waterTemp_C": "15",
                "windspeedKmph": "12", "winddir16Point": "SSW",
                "weatherDesc": [{ "value": "Clear" }],
                "swellHeight_m": "0.4", "swellDir": "170",
                "swellDir16Point": "S", "swellPeriod_secs": "8",
                "sigHeight_m": "0.6", "visibility": "10"
            }]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/marine"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("query", "40.71,-74.01"))
        .and(query_param("units", "m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.marine("40.71", "-74.01").await.expect("should parse marine");

    assert_eq!(response.nearest().unwrap().region_name(), Some("New York"));
    let day = response.first_day().expect("one day per request");
    assert_eq!(day.mintemp_c, "16");
    assert_eq!(day.hourly[0].water_temp_c, "15");
}

#[tokio::test]
async fn embedded_error_in_200_body_fails_with_the_info_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": false,
        "error": {
            "code": 615,
            "type": "request_failed",
            "info": "Your API request failed. Please try again or contact support."
        }
    });

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.current("nowhere-at-all").await.unwrap_err();

    assert!(err.is_provider_error());
    assert_eq!(
        err.to_string(),
        "Your API request failed. Please try again or contact support."
    );
}

#[tokio::test]
async fn embedded_error_takes_precedence_over_http_status() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 101,
            "type": "invalid_access_key",
            "info": "You have not supplied a valid API Access Key."
        }
    });

    Mock::given(method("GET"))
        .and(path("/marine"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.marine("1.0", "2.0").await.unwrap_err();

    match err {
        WeatherError::Provider { code, ref kind, ref info } => {
            assert_eq!(code, 101);
            assert_eq!(kind, "invalid_access_key");
            assert_eq!(info, "You have not supplied a valid API Access Key.");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_without_error_object_is_a_generic_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/historical"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let err = client.historical("Paris", date).await.unwrap_err();

    assert!(matches!(err, WeatherError::Transport { .. }));
    assert_eq!(err.to_string(), "failed to fetch historical weather");
}

#[tokio::test]
async fn success_status_with_malformed_body_is_a_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.current("Boston").await.unwrap_err();

    assert!(matches!(err, WeatherError::Json { .. }));
}
