//! The async-query state machine every result view shares.
//!
//! A view's request lifecycle is `idle → loading → (ready | failed)`,
//! re-entrant from any state. Each issued request carries a monotonically
//! increasing token; a resolution is applied only when its token is still the
//! most recently issued one, so the last-*issued* request wins even when an
//! older request resolves later. The underlying transport call is never
//! cancelled, its late result is simply dropped.

use std::fmt::Display;

use tracing::debug;

/// Display state of one view's query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// Proof that a request was issued; pass it back to [`QueryCell::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct QueryCell<T> {
    state: QueryState<T>,
    issued: u64,
}

impl<T> Default for QueryCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCell<T> {
    pub fn new() -> Self {
        Self { state: QueryState::Idle, issued: 0 }
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a new request and transitions to `Loading` from any state.
    /// Tokens from earlier, still-unresolved requests become stale.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = QueryState::Loading;
        RequestToken(self.issued)
    }

    /// Applies a request outcome. A success replaces any stored error; a
    /// failure replaces any stored data, so stale values are never shown.
    /// Outcomes for superseded tokens are discarded; returns whether the
    /// outcome was applied.
    pub fn resolve<E: Display>(&mut self, token: RequestToken, outcome: Result<T, E>) -> bool {
        if token.0 != self.issued {
            debug!(token = token.0, issued = self.issued, "dropping superseded response");
            return false;
        }

        self.state = match outcome {
            Ok(data) => QueryState::Ready(data),
            Err(err) => QueryState::Failed(err.to_string()),
        };
        true
    }

    /// Convenience for sequential callers: begin, await, resolve.
    pub async fn run<E, F>(&mut self, fut: F) -> bool
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        let token = self.begin();
        let outcome = fut.await;
        self.resolve(token, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_enters_loading_on_begin() {
        let mut cell: QueryCell<u32> = QueryCell::new();
        assert_eq!(*cell.state(), QueryState::Idle);
        assert!(!cell.is_loading());

        cell.begin();
        assert!(cell.is_loading());
        assert!(cell.data().is_none());
        assert!(cell.error().is_none());
    }

    #[test]
    fn success_clears_prior_error_and_failure_clears_prior_data() {
        let mut cell: QueryCell<u32> = QueryCell::new();

        let token = cell.begin();
        assert!(cell.resolve(token, Err::<u32, _>("unknown location")));
        assert_eq!(cell.error(), Some("unknown location"));

        let token = cell.begin();
        assert!(cell.resolve(token, Ok::<_, &str>(7)));
        assert_eq!(cell.data(), Some(&7));
        assert!(cell.error().is_none());

        let token = cell.begin();
        assert!(cell.resolve(token, Err::<u32, _>("rate limited")));
        assert!(cell.data().is_none(), "no stale data after a failure");
        assert_eq!(cell.error(), Some("rate limited"));
    }

    #[test]
    fn later_issued_request_wins_over_earlier_one_resolving_last() {
        let mut cell: QueryCell<&str> = QueryCell::new();

        let slow = cell.begin();
        let fast = cell.begin();

        // the fast (later-issued) request resolves first and is applied
        assert!(cell.resolve(fast, Ok::<_, &str>("fast")));
        assert_eq!(cell.data(), Some(&"fast"));

        // the slow one resolves afterwards and is dropped
        assert!(!cell.resolve(slow, Ok::<_, &str>("slow")));
        assert_eq!(cell.data(), Some(&"fast"));
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_success() {
        let mut cell: QueryCell<&str> = QueryCell::new();

        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.resolve(second, Ok::<_, &str>("current")));
        assert!(!cell.resolve(first, Err::<&str, _>("timed out")));

        assert_eq!(cell.data(), Some(&"current"));
        assert!(cell.error().is_none());
    }

    #[test]
    fn any_state_reenters_loading() {
        let mut cell: QueryCell<u32> = QueryCell::new();

        let token = cell.begin();
        cell.resolve(token, Ok::<_, &str>(1));
        cell.begin();
        assert!(cell.is_loading());

        let token = cell.begin();
        cell.resolve(token, Err::<u32, _>("boom"));
        cell.begin();
        assert!(cell.is_loading());
    }

    #[tokio::test]
    async fn run_drives_a_future_through_the_cell() {
        let mut cell: QueryCell<u32> = QueryCell::new();

        assert!(cell.run(async { Ok::<_, &str>(42) }).await);
        assert_eq!(cell.data(), Some(&42));

        assert!(cell.run(async { Err::<u32, _>("nope") }).await);
        assert_eq!(cell.error(), Some("nope"));
    }
}
