//! Response shapes for the three Weatherstack query kinds.
//!
//! These structs mirror the provider's JSON field-for-field; they are
//! transient, request-scoped projections and are never created or mutated
//! locally. Day and hourly sequences keep the provider's ordering: the
//! historical map is keyed by `YYYY-MM-DD` date strings (so iteration is
//! date-ascending) and the hourly vectors are left exactly as delivered.
//!
//! Deserialization is deliberately lenient (`#[serde(default)]` throughout):
//! the contract is "whatever parses is returned", with no field validation
//! beyond the JSON itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The error object the provider embeds in an otherwise-200 response to
/// signal a logical failure (invalid query, unknown location, bad key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub info: String,
}

/// Echo of the request, returned alongside every successful response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestEcho {
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    pub language: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherLocation {
    pub name: String,
    pub country: String,
    pub region: String,
    pub lat: String,
    pub lon: String,
    pub localtime: String,
}

// -------------------------------------------------------------------------
// /current

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_descriptions: Vec<String>,
    pub weather_icons: Vec<String>,
    pub wind_speed: f64,
    pub wind_dir: String,
    pub pressure: f64,
    pub precip: f64,
    pub humidity: f64,
    pub cloudcover: f64,
    pub feelslike: f64,
    pub uv_index: f64,
    pub visibility: f64,
    pub observation_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherResponse {
    pub request: Option<RequestEcho>,
    pub location: WeatherLocation,
    pub current: CurrentConditions,
}

impl CurrentConditions {
    /// First free-text description, the one the provider intends for display.
    pub fn description(&self) -> Option<&str> {
        self.weather_descriptions.first().map(String::as_str)
    }

    pub fn icon(&self) -> Option<&str> {
        self.weather_icons.first().map(String::as_str)
    }
}

// -------------------------------------------------------------------------
// /historical

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalHour {
    pub time: String,
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_descriptions: Vec<String>,
    pub weather_icons: Vec<String>,
    pub humidity: f64,
    pub precip: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalDay {
    pub date: String,
    pub date_epoch: i64,
    pub astro: Option<Astro>,
    pub mintemp: f64,
    pub maxtemp: f64,
    pub avgtemp: f64,
    pub totalsnow: f64,
    pub sunhour: f64,
    pub uv_index: f64,
    pub hourly: Vec<HistoricalHour>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalWeatherResponse {
    pub request: Option<RequestEcho>,
    pub location: Option<WeatherLocation>,
    /// Keyed by `YYYY-MM-DD`; one entry per requested date.
    pub historical: BTreeMap<String, HistoricalDay>,
}

impl HistoricalWeatherResponse {
    /// The first (earliest-dated) day record. The provider returns one date
    /// per request, so this is effectively *the* result.
    pub fn first_day(&self) -> Option<&HistoricalDay> {
        self.historical.values().next()
    }
}

// -------------------------------------------------------------------------
// /marine

/// The marine endpoint wraps plain strings in `{ "value": … }` objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextValue {
    pub value: String,
}

/// Nearest-area match for the queried coordinates. Numeric values arrive as
/// strings on this endpoint and are kept that way; converting them would be
/// a computation this crate does not do.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestArea {
    pub latitude: String,
    pub longitude: String,
    pub region: Vec<TextValue>,
    pub country: Vec<TextValue>,
}

impl NearestArea {
    pub fn region_name(&self) -> Option<&str> {
        self.region.first().map(|v| v.value.as_str())
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country.first().map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarineHour {
    pub time: String,
    #[serde(rename = "tempC")]
    pub temp_c: String,
    #[serde(rename = "waterTemp_C")]
    pub water_temp_c: String,
    #[serde(rename = "windspeedKmph")]
    pub windspeed_kmph: String,
    #[serde(rename = "winddir16Point")]
    pub winddir_16_point: String,
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<TextValue>,
    #[serde(rename = "swellHeight_m")]
    pub swell_height_m: String,
    #[serde(rename = "swellDir")]
    pub swell_dir: String,
    #[serde(rename = "swellDir16Point")]
    pub swell_dir_16_point: String,
    #[serde(rename = "swellPeriod_secs")]
    pub swell_period_secs: String,
    #[serde(rename = "sigHeight_m")]
    pub sig_height_m: String,
    pub visibility: String,
}

impl MarineHour {
    pub fn description(&self) -> Option<&str> {
        self.weather_desc.first().map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarineDay {
    pub date: String,
    #[serde(rename = "maxtempC")]
    pub maxtemp_c: String,
    #[serde(rename = "mintempC")]
    pub mintemp_c: String,
    pub hourly: Vec<MarineHour>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarineWeatherResponse {
    pub request: Option<RequestEcho>,
    pub nearest_area: Vec<NearestArea>,
    /// One record per day, date-ascending as delivered.
    pub weather: Vec<MarineDay>,
}

impl MarineWeatherResponse {
    /// The first day record; the provider returns one day per request.
    pub fn first_day(&self) -> Option<&MarineDay> {
        self.weather.first()
    }

    pub fn nearest(&self) -> Option<&NearestArea> {
        self.nearest_area.first()
    }
}
