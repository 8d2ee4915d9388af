//! HTTP client for the Weatherstack API.
//!
//! Three GET endpoints, all query-string parameterized: `/current`,
//! `/historical` and `/marine`. The provider signals logical failures as an
//! `error` object inside a 200 body, so every response is checked for that
//! envelope before the typed shape is deserialized.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::WeatherError;
use crate::model::{
    ApiError, CurrentWeatherResponse, HistoricalWeatherResponse, MarineWeatherResponse,
};

/// The three query kinds the provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Current,
    Historical,
    Marine,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Current => "current",
            Operation::Historical => "historical",
            Operation::Marine => "marine",
        }
    }

    pub const fn all() -> &'static [Operation] {
        &[Operation::Current, Operation::Historical, Operation::Marine]
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fetch surface the result views program against. Implemented by
/// [`WeatherstackClient`] for production and by scripted stubs in tests.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Current conditions for a free-text location query: a place name,
    /// postal code, `"lat,lon"` pair, or the [`IP_LOOKUP_QUERY`] sentinel.
    ///
    /// [`IP_LOOKUP_QUERY`]: crate::search::IP_LOOKUP_QUERY
    async fn current(&self, query: &str) -> Result<CurrentWeatherResponse, WeatherError>;

    /// Hourly conditions for one past date.
    async fn historical(
        &self,
        query: &str,
        date: NaiveDate,
    ) -> Result<HistoricalWeatherResponse, WeatherError>;

    /// Marine conditions near a coordinate pair.
    async fn marine(&self, lat: &str, lon: &str) -> Result<MarineWeatherResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WeatherstackClient {
    /// Credential and endpoint come from [`Config`]; nothing is read from
    /// module-level state. No timeout is configured, the transport default
    /// applies.
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        op: Operation,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, op.as_str());

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        query.push(("access_key", self.api_key.as_str()));
        query.extend_from_slice(params);
        query.push(("units", "m"));

        debug!(operation = op.as_str(), "querying weatherstack");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::send(op, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::send(op, e))?;

        // An embedded error object wins over the status line: the provider
        // reports invalid queries and credential problems inside a 200 body.
        if let Some(err) = embedded_error(&body) {
            debug!(operation = op.as_str(), code = err.code, "provider error");
            return Err(WeatherError::Provider {
                code: err.code,
                kind: err.kind,
                info: err.info,
            });
        }

        if !status.is_success() {
            return Err(WeatherError::status(op, status));
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Json {
            operation: op,
            source,
        })
    }
}

#[async_trait]
impl WeatherApi for WeatherstackClient {
    async fn current(&self, query: &str) -> Result<CurrentWeatherResponse, WeatherError> {
        self.get(Operation::Current, &[("query", query)]).await
    }

    async fn historical(
        &self,
        query: &str,
        date: NaiveDate,
    ) -> Result<HistoricalWeatherResponse, WeatherError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.get(
            Operation::Historical,
            &[("query", query), ("historical_date", &date), ("hourly", "1")],
        )
        .await
    }

    async fn marine(&self, lat: &str, lon: &str) -> Result<MarineWeatherResponse, WeatherError> {
        let coords = format!("{lat},{lon}");
        self.get(Operation::Marine, &[("query", &coords)]).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

/// Returns the embedded `error` object when the body carries one. A body that
/// is not a JSON object (or has no `error` field) yields `None`.
fn embedded_error(body: &str) -> Option<ApiError> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_match_endpoint_paths() {
        for op in Operation::all() {
            assert!(matches!(op.as_str(), "current" | "historical" | "marine"));
        }
        assert_eq!(Operation::Historical.to_string(), "historical");
    }

    #[test]
    fn embedded_error_found_in_200_style_body() {
        let body = r#"{
            "success": false,
            "error": { "code": 615, "type": "request_failed", "info": "Your API request failed." }
        }"#;

        let err = embedded_error(body).expect("error object should parse");
        assert_eq!(err.code, 615);
        assert_eq!(err.kind, "request_failed");
        assert_eq!(err.info, "Your API request failed.");
    }

    #[test]
    fn embedded_error_absent_for_success_and_non_object_bodies() {
        assert!(embedded_error(r#"{"location":{"name":"Boston"}}"#).is_none());
        assert!(embedded_error("[1,2,3]").is_none());
        assert!(embedded_error("not json at all").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let cfg = Config::new("k").with_base_url("http://localhost:9/");
        let client = WeatherstackClient::new(&cfg);
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
