use thiserror::Error;

use crate::client::Operation;

/// Errors returned by the Weatherstack client.
///
/// The provider reports logical failures (bad query, unknown location, bad
/// credential) through an `error` object embedded in an otherwise successful
/// response body, so [`WeatherError::Provider`] takes precedence over the
/// HTTP status line whenever both are present.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network failure or non-success HTTP status. Deliberately coarse: the
    /// status line carries no information the embedded error object doesn't.
    #[error("failed to fetch {operation} weather")]
    Transport {
        operation: Operation,
        /// Status of the response, if one arrived at all.
        status: Option<reqwest::StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body carried a populated `error` object. Displays as the
    /// provider's own `info` text. `code` and `kind` are retained so callers
    /// may distinguish rate limits from invalid queries, but no mapping onto
    /// further variants is attempted.
    #[error("{info}")]
    Provider {
        code: i64,
        kind: String,
        info: String,
    },

    /// The response body was not the documented shape.
    #[error("failed to parse {operation} weather response")]
    Json {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    pub(crate) fn send(operation: Operation, source: reqwest::Error) -> Self {
        WeatherError::Transport {
            operation,
            status: None,
            source: Some(source),
        }
    }

    pub(crate) fn status(operation: Operation, status: reqwest::StatusCode) -> Self {
        WeatherError::Transport {
            operation,
            status: Some(status),
            source: None,
        }
    }

    /// True when the failure came from the provider's embedded error object.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, WeatherError::Provider { .. })
    }
}
