//! Result views and the tabbed shell.
//!
//! Each view owns its request state through a [`QueryCell`] plus whatever
//! input fields it needs; there is no state shared across views, and two
//! views may have requests in flight at the same time without interacting.
//! The shell only knows which tab is active; switching away neither cancels
//! nor resets the hidden view.

use chrono::NaiveDate;

use crate::client::WeatherApi;
use crate::model::{
    CurrentWeatherResponse, HistoricalDay, HistoricalWeatherResponse, MarineDay,
    MarineWeatherResponse, NearestArea,
};
use crate::query::QueryCell;
use crate::search::LocationSearch;

/// Current-conditions view. Its search text lives in the shell's
/// [`LocationSearch`]; this struct owns only the fetch state.
#[derive(Debug, Default)]
pub struct CurrentView {
    query: QueryCell<CurrentWeatherResponse>,
}

impl CurrentView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches current conditions for `location` (free text, coordinates, or
    /// the IP sentinel). Returns whether the outcome was applied, i.e. not
    /// superseded by a newer search.
    pub async fn search<A: WeatherApi + ?Sized>(&mut self, api: &A, location: &str) -> bool {
        self.query.run(api.current(location)).await
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub fn data(&self) -> Option<&CurrentWeatherResponse> {
        self.query.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

/// Historical view: location + date inputs and the day/hourly result.
#[derive(Debug, Default)]
pub struct HistoricalView {
    pub location: String,
    pub date: Option<NaiveDate>,
    query: QueryCell<HistoricalWeatherResponse>,
}

impl HistoricalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the stored location/date pair. A missing location or date is
    /// a no-op, matching the disabled search control.
    pub async fn search<A: WeatherApi + ?Sized>(&mut self, api: &A) -> bool {
        let location = self.location.trim().to_string();
        let Some(date) = self.date else {
            return false;
        };
        if location.is_empty() {
            return false;
        }

        self.query.run(api.historical(&location, date)).await
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub fn data(&self) -> Option<&HistoricalWeatherResponse> {
        self.query.data()
    }

    /// The single day record the provider returns for one request.
    pub fn day(&self) -> Option<&HistoricalDay> {
        self.data().and_then(HistoricalWeatherResponse::first_day)
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

/// Marine view: coordinate inputs and the per-day marine result.
#[derive(Debug, Default)]
pub struct MarineView {
    pub lat: String,
    pub lon: String,
    query: QueryCell<MarineWeatherResponse>,
}

impl MarineView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches marine conditions for the stored coordinates. Either field
    /// being empty is a no-op.
    pub async fn search<A: WeatherApi + ?Sized>(&mut self, api: &A) -> bool {
        let (lat, lon) = (self.lat.trim().to_string(), self.lon.trim().to_string());
        if lat.is_empty() || lon.is_empty() {
            return false;
        }

        self.query.run(api.marine(&lat, &lon)).await
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub fn data(&self) -> Option<&MarineWeatherResponse> {
        self.query.data()
    }

    pub fn day(&self) -> Option<&MarineDay> {
        self.data().and_then(MarineWeatherResponse::first_day)
    }

    pub fn nearest(&self) -> Option<&NearestArea> {
        self.data().and_then(MarineWeatherResponse::nearest)
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

/// The active view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Current,
    Historical,
    Marine,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Current => "current",
            Tab::Historical => "historical",
            Tab::Marine => "marine",
        }
    }

    pub const fn all() -> &'static [Tab] {
        &[Tab::Current, Tab::Historical, Tab::Marine]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level composition: the tab selector, the location search box, and the
/// three views. The only cross-view state is which tab is active; the
/// current view's fetch state is owned here, beside the search box that
/// feeds it.
#[derive(Debug, Default)]
pub struct Shell {
    tab: Tab,
    pub search: LocationSearch,
    pub current: CurrentView,
    pub historical: HistoricalView,
    pub marine: MarineView,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.tab
    }

    /// Switches the active tab. Hidden views keep their request state and
    /// reappear unchanged when reselected.
    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }
}
