//! Core library for the `weatherglass` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - A typed client for the Weatherstack HTTP API (current / historical / marine)
//! - The search-input and per-view request state machines the front end drives
//!
//! It is used by `weatherglass-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod search;
pub mod view;

pub use client::{Operation, WeatherApi, WeatherstackClient};
pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeatherResponse, HistoricalWeatherResponse, MarineWeatherResponse};
pub use query::{QueryCell, QueryState, RequestToken};
pub use search::{GeoError, GeoLocator, IP_LOOKUP_QUERY, LocationSearch, SearchInput};
pub use view::{Shell, Tab};
