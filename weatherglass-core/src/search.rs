//! Search-input state: a single text field with trim-on-submit semantics,
//! plus the location variant that can resolve the device position.

use thiserror::Error;

/// Reserved query value meaning "resolve the caller's location from its
/// network address" rather than a literal place name. The provider accepts it
/// verbatim as the `query` parameter.
pub const IP_LOOKUP_QUERY: &str = "fetch:ip";

/// Device-position lookup failed or was denied. Never surfaced to the user;
/// the search falls back to [`IP_LOOKUP_QUERY`] instead.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geolocation is not available")]
    Unavailable,

    #[error("geolocation permission denied")]
    Denied,
}

/// Source of device coordinates. The CLI ships no OS backend, so its
/// implementation always errors and the IP fallback applies; tests script
/// both outcomes.
pub trait GeoLocator {
    fn locate(&self) -> Result<(f64, f64), GeoError>;
}

/// A free-text search field. Submission hands the trimmed text to a handler;
/// the field itself is neither cleared nor validated further.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Invokes `on_search` exactly once with the trimmed text when it is
    /// non-empty; whitespace-only input invokes nothing. Returns whether the
    /// handler ran.
    pub fn submit(&self, on_search: impl FnOnce(&str)) -> bool {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return false;
        }
        on_search(trimmed);
        true
    }
}

/// [`SearchInput`] plus a "use current position" action.
#[derive(Debug, Clone, Default)]
pub struct LocationSearch {
    pub input: SearchInput,
}

impl LocationSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the device position and invokes the handler with a
    /// `"lat,lon"` query. Denial or failure silently substitutes the
    /// [`IP_LOOKUP_QUERY`] sentinel, signaling IP-based lookup to the
    /// provider. The handler always runs.
    pub fn use_current_position(&self, locator: &dyn GeoLocator, on_search: impl FnOnce(&str)) {
        match locator.locate() {
            Ok((lat, lon)) => on_search(&format!("{lat},{lon}")),
            Err(_) => on_search(IP_LOOKUP_QUERY),
        }
    }
}
