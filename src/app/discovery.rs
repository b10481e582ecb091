//! Discovery controller: result-set fetches and their reconciliation.
//!
//! [`DiscoveryController`] owns the only mutable core state,
//! [`DiscoveryState`], and is the single place where catalog responses are
//! allowed to change it.
//!
//! # Ordering
//!
//! Responses arrive in any order. Each main fetch takes the next value of a
//! per-slot sequence counter when it is issued, and only the response carrying
//! the highest issued number may commit ("last issued wins"). Anything older
//! is discarded on arrival, success or failure alike. Detail lookups live in
//! their own slot, guarded by the id of the open overlay (see
//! [`DetailResolver`]).
//!
//! # Failure
//!
//! A failed fetch never blanks the screen: results stay, the mode returns to
//! the last settled one, and a [`FetchNotice`] is raised until the next
//! successful commit. [`DiscoveryController::retry`] re-issues the failed
//! operation.
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{DiscoveryController, DiscoverySettings, Mode};
//! use cinedex::catalog::CatalogResponse;
//! use cinedex::domain::MovieSummary;
//!
//! let (mut controller, initial) = DiscoveryController::start(DiscoverySettings::default());
//! assert_eq!(controller.state().mode(), Mode::Loading);
//!
//! let movies = vec![MovieSummary::new("tt0111161", "The Shawshank Redemption")];
//! controller.apply(CatalogResponse::movies(initial, movies));
//! assert_eq!(controller.state().mode(), Mode::Top);
//! ```

use super::detail::DetailResolver;
use super::modes::Mode;
use crate::catalog::{CatalogPayload, CatalogQuery, CatalogRequest, CatalogResponse};
use crate::domain::{MovieSummary, NetworkFailure, Selection};

/// Default number of top rated movies requested.
pub const DEFAULT_TOP_LIMIT: u32 = 20;

/// Default page size for title searches.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fetch sizes used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// `limit` for top rated fetches.
    pub top_limit: u32,
    /// `size` for title search fetches (always page 0).
    pub page_size: u32,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            top_limit: DEFAULT_TOP_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A main-slot operation, kept to commit its response and to retry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainFetch {
    /// Top rated list.
    TopRated,
    /// Title search for the given raw text.
    Search {
        /// Text exactly as submitted.
        text: String,
    },
}

/// Transient indicator for a failed main fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchNotice {
    /// The operation that failed (what `retry` re-issues).
    pub fetch: MainFetch,
    /// Why it failed.
    pub failure: NetworkFailure,
    /// Unix timestamp of the failure.
    pub occurred_at: i64,
}

impl FetchNotice {
    fn new(fetch: MainFetch, failure: NetworkFailure) -> Self {
        Self {
            fetch,
            failure,
            occurred_at: chrono::Utc::now().timestamp(),
        }
    }

    /// One-line, user-facing description.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use cinedex::app::{FetchNotice, MainFetch};
    /// # use cinedex::domain::NetworkFailure;
    /// let notice = FetchNotice {
    ///     fetch: MainFetch::TopRated,
    ///     failure: NetworkFailure::Status { status: 503 },
    ///     occurred_at: 0,
    /// };
    /// assert_eq!(notice.message(), "Top rated refresh failed: catalog returned HTTP 503");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match &self.fetch {
            MainFetch::TopRated => format!("Top rated refresh failed: {}", self.failure),
            MainFetch::Search { text } => format!("Search for \"{text}\" failed: {}", self.failure),
        }
    }
}

/// Why a response was dropped without touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer fetch was issued in the same slot after this one.
    Superseded {
        /// Sequence number of the dropped response.
        seq: u64,
        /// Highest sequence number issued.
        latest: u64,
    },

    /// The latest main fetch was already settled (duplicate delivery).
    AlreadySettled {
        /// Sequence number of the dropped response.
        seq: u64,
    },

    /// The overlay was closed before the detail arrived.
    OverlayClosed {
        /// Id the detail was requested for.
        id: String,
    },

    /// The overlay now shows a different movie.
    OverlayMoved {
        /// Id the detail was requested for.
        id: String,
        /// Id currently shown in the overlay.
        open: String,
    },
}

/// What applying a response did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// A result set was committed.
    Committed {
        /// Mode after the commit (`Top`, `Search` or `Empty`).
        mode: Mode,
        /// Number of results committed.
        count: usize,
    },

    /// The latest main fetch failed; previous results remain.
    Failed(NetworkFailure),

    /// The open overlay was upgraded to the detail record.
    Upgraded {
        /// Id of the upgraded movie.
        id: String,
    },

    /// The detail fetch failed; the overlay keeps the summary.
    Kept {
        /// Id of the movie in the overlay.
        id: String,
        /// Why the detail could not be resolved.
        failure: NetworkFailure,
    },

    /// Stale response, dropped silently.
    Discarded(DiscardReason),
}

impl Settlement {
    /// Whether the view needs to be redrawn.
    #[must_use]
    pub const fn changed_view(&self) -> bool {
        !matches!(self, Self::Discarded(_) | Self::Kept { .. })
    }
}

/// The discovery state exposed to the presentation layer.
///
/// Read-only outside this module; every mutation goes through
/// [`DiscoveryController`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryState {
    mode: Mode,
    results: Vec<MovieSummary>,
    query: String,
    selected: Option<Selection>,
    notice: Option<FetchNotice>,
}

impl DiscoveryState {
    const fn new() -> Self {
        Self {
            mode: Mode::Idle,
            results: Vec::new(),
            query: String::new(),
            selected: None,
            notice: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Last committed result set (also while loading).
    #[must_use]
    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    /// Last committed search text; empty after a top rated commit.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Overlay content; `None` when the overlay is closed.
    #[must_use]
    pub const fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&FetchNotice> {
        self.notice.as_ref()
    }
}

/// Drives every transition of [`DiscoveryState`].
#[derive(Debug)]
pub struct DiscoveryController {
    state: DiscoveryState,
    settings: DiscoverySettings,
    /// Highest main-slot sequence number issued so far.
    issued: u64,
    /// The latest issued main fetch, until it settles.
    in_flight: Option<MainFetch>,
    /// Mode of the last terminal state; what a failure reverts to.
    settled_mode: Mode,
    resolver: DetailResolver,
}

impl DiscoveryController {
    /// Creates the controller with the implicit top rated fetch in flight.
    ///
    /// The returned request must be dispatched; its response is the first
    /// commit.
    #[must_use]
    pub fn start(settings: DiscoverySettings) -> (Self, CatalogRequest) {
        let mut controller = Self {
            state: DiscoveryState::new(),
            settings,
            issued: 0,
            in_flight: None,
            settled_mode: Mode::Idle,
            resolver: DetailResolver::default(),
        };
        let request = controller.load_top_rated();
        (controller, request)
    }

    /// Read-only view of the discovery state.
    #[must_use]
    pub const fn state(&self) -> &DiscoveryState {
        &self.state
    }

    #[must_use]
    pub const fn settings(&self) -> DiscoverySettings {
        self.settings
    }

    /// Mode of the last terminal state, ignoring any fetch in flight.
    #[must_use]
    pub const fn settled_mode(&self) -> Mode {
        self.settled_mode
    }

    /// Whether the latest main fetch is still outstanding.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Highest main-slot sequence number issued so far.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Requests the top rated list.
    pub fn load_top_rated(&mut self) -> CatalogRequest {
        self.issue(MainFetch::TopRated)
    }

    /// Requests a title search, unless `text` is blank.
    ///
    /// Returns `None` (and changes nothing) for empty or whitespace-only text.
    pub fn search(&mut self, text: &str) -> Option<CatalogRequest> {
        if text.trim().is_empty() {
            tracing::debug!("blank search ignored");
            return None;
        }
        Some(self.issue(MainFetch::Search { text: text.to_string() }))
    }

    /// Opens the overlay for `summary` and requests its detail.
    pub fn select_movie(&mut self, summary: MovieSummary) -> CatalogRequest {
        self.resolver.resolve(&mut self.state.selected, summary)
    }

    /// Closes the overlay. No network effect.
    pub fn close_overlay(&mut self) {
        if let Some(selection) = self.state.selected.take() {
            tracing::debug!(id = %selection.id(), "overlay closed");
        }
    }

    /// Re-issues the main fetch named by the current notice.
    ///
    /// Returns `None` when nothing failed or a newer fetch is already in
    /// flight.
    pub fn retry(&mut self) -> Option<CatalogRequest> {
        if self.in_flight.is_some() {
            tracing::debug!("retry ignored, fetch already in flight");
            return None;
        }
        let fetch = self.state.notice.as_ref()?.fetch.clone();
        tracing::debug!(fetch = ?fetch, "retrying failed fetch");
        Some(self.issue(fetch))
    }

    /// Reconciles a catalog response against the current state.
    pub fn apply(&mut self, response: CatalogResponse) -> Settlement {
        let CatalogResponse { request, outcome } = response;

        let settlement = match request.query {
            CatalogQuery::Detail { id } => {
                self.resolver.settle(&mut self.state.selected, request.seq, &id, outcome)
            }
            CatalogQuery::TopRated { .. } | CatalogQuery::ByTitle { .. } => {
                self.settle_main(request.seq, outcome)
            }
        };

        tracing::debug!(
            seq = request.seq,
            settlement = ?settlement,
            mode = ?self.state.mode,
            "catalog response applied"
        );

        settlement
    }

    fn issue(&mut self, fetch: MainFetch) -> CatalogRequest {
        self.issued += 1;
        let seq = self.issued;

        let request = match &fetch {
            MainFetch::TopRated => CatalogRequest::top_rated(seq, self.settings.top_limit),
            MainFetch::Search { text } => {
                CatalogRequest::by_title(seq, text.clone(), 0, self.settings.page_size)
            }
        };

        tracing::debug!(seq, fetch = ?fetch, previous_mode = ?self.state.mode, "main fetch issued");

        self.state.mode = Mode::Loading;
        self.in_flight = Some(fetch);
        request
    }

    fn settle_main(
        &mut self,
        seq: u64,
        outcome: Result<CatalogPayload, NetworkFailure>,
    ) -> Settlement {
        if seq != self.issued {
            return Settlement::Discarded(DiscardReason::Superseded {
                seq,
                latest: self.issued,
            });
        }

        let Some(fetch) = self.in_flight.take() else {
            return Settlement::Discarded(DiscardReason::AlreadySettled { seq });
        };

        match outcome {
            Ok(CatalogPayload::Movies(movies)) => self.commit(fetch, movies),
            Ok(CatalogPayload::Detail(_)) => self.fail(
                fetch,
                NetworkFailure::Decode("expected a movie list, got a single record".to_string()),
            ),
            Err(failure) => self.fail(fetch, failure),
        }
    }

    fn commit(&mut self, fetch: MainFetch, movies: Vec<MovieSummary>) -> Settlement {
        let count = movies.len();
        let (mode, query) = match fetch {
            MainFetch::TopRated => (Mode::Top, String::new()),
            MainFetch::Search { text } => (Mode::Search, text),
        };
        let mode = if count == 0 { Mode::Empty } else { mode };

        self.state.mode = mode;
        self.state.results = movies;
        self.state.query = query;
        self.state.notice = None;
        self.settled_mode = mode;

        Settlement::Committed { mode, count }
    }

    fn fail(&mut self, fetch: MainFetch, failure: NetworkFailure) -> Settlement {
        tracing::warn!(fetch = ?fetch, error = %failure, "main fetch failed, keeping previous results");

        self.state.mode = self.settled_mode;
        self.state.notice = Some(FetchNotice::new(fetch, failure.clone()));

        Settlement::Failed(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies(n: usize, prefix: &str) -> Vec<MovieSummary> {
        (0..n)
            .map(|i| MovieSummary::new(format!("{prefix}{i}"), format!("{prefix} movie {i}")))
            .collect()
    }

    fn started() -> (DiscoveryController, CatalogRequest) {
        DiscoveryController::start(DiscoverySettings::default())
    }

    #[test]
    fn starts_loading_with_top_rated_in_flight() {
        let (controller, request) = started();

        assert_eq!(controller.state().mode(), Mode::Loading);
        assert!(controller.state().results().is_empty());
        assert_eq!(request.seq, 1);
        assert_eq!(request.query, CatalogQuery::TopRated { limit: 20 });
    }

    #[test]
    fn top_rated_commit_shows_twenty_movies() {
        let (mut controller, request) = started();

        let settlement = controller.apply(CatalogResponse::movies(request, movies(20, "tt")));

        assert_eq!(settlement, Settlement::Committed { mode: Mode::Top, count: 20 });
        assert_eq!(controller.state().mode(), Mode::Top);
        assert_eq!(controller.state().results().len(), 20);
        assert_eq!(controller.state().query(), "");
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(3, "tt")));
        let before = controller.state().clone();

        assert!(controller.search("").is_none());
        assert!(controller.search("   \t").is_none());

        assert_eq!(controller.state(), &before);
        assert_eq!(controller.latest_seq(), 1);
    }

    #[test]
    fn empty_search_result_is_empty_mode() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(5, "tt")));

        let search = controller.search("Matrix").unwrap();
        assert_eq!(
            search.query,
            CatalogQuery::ByTitle { title: "Matrix".to_string(), page: 0, size: 20 }
        );
        controller.apply(CatalogResponse::movies(search, Vec::new()));

        assert_eq!(controller.state().mode(), Mode::Empty);
        assert!(controller.state().results().is_empty());
        assert_eq!(controller.state().query(), "Matrix");
    }

    #[test]
    fn failure_keeps_results_and_restores_mode() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(4, "tt")));
        let results_before = controller.state().results().to_vec();

        let search = controller.search("Alien").unwrap();
        assert_eq!(controller.state().mode(), Mode::Loading);
        assert_eq!(controller.state().results(), results_before.as_slice());

        let failure = NetworkFailure::Status { status: 500 };
        let settlement = controller.apply(CatalogResponse::failed(search, failure.clone()));

        assert_eq!(settlement, Settlement::Failed(failure));
        assert_eq!(controller.state().mode(), Mode::Top);
        assert_eq!(controller.state().results(), results_before.as_slice());
        assert_eq!(controller.state().query(), "");
        assert!(controller.state().notice().is_some());
    }

    #[test]
    fn first_fetch_failure_returns_to_idle() {
        let (mut controller, request) = started();

        controller.apply(CatalogResponse::failed(
            request,
            NetworkFailure::Transport("connection refused".to_string()),
        ));

        assert_eq!(controller.state().mode(), Mode::Idle);
        assert!(!controller.is_fetching());
    }

    #[test]
    fn later_issue_wins_over_slower_earlier_response() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(2, "tt")));

        let search = controller.search("a").unwrap();
        let top = controller.load_top_rated();

        let top_settlement = controller.apply(CatalogResponse::movies(top, movies(20, "top")));
        let search_settlement = controller.apply(CatalogResponse::movies(search, movies(3, "a")));

        assert_eq!(top_settlement, Settlement::Committed { mode: Mode::Top, count: 20 });
        assert_eq!(
            search_settlement,
            Settlement::Discarded(DiscardReason::Superseded { seq: 2, latest: 3 })
        );
        assert_eq!(controller.state().mode(), Mode::Top);
        assert_eq!(controller.state().results()[0].id, "top0");
    }

    #[test]
    fn stale_failure_does_not_end_loading() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(2, "tt")));

        let first = controller.search("first").unwrap();
        let second = controller.search("second").unwrap();

        controller.apply(CatalogResponse::failed(first, NetworkFailure::Status { status: 502 }));
        assert_eq!(controller.state().mode(), Mode::Loading);
        assert!(controller.state().notice().is_none());

        controller.apply(CatalogResponse::movies(second, movies(1, "second")));
        assert_eq!(controller.state().mode(), Mode::Search);
        assert_eq!(controller.state().query(), "second");
    }

    #[test]
    fn duplicate_delivery_is_discarded() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request.clone(), movies(2, "tt")));

        let settlement = controller.apply(CatalogResponse::movies(request, movies(9, "dup")));

        assert_eq!(settlement, Settlement::Discarded(DiscardReason::AlreadySettled { seq: 1 }));
        assert_eq!(controller.state().results().len(), 2);
    }

    #[test]
    fn retry_reissues_the_failed_search() {
        let (mut controller, request) = started();
        controller.apply(CatalogResponse::movies(request, movies(2, "tt")));
        assert!(controller.retry().is_none());

        let search = controller.search("Heat").unwrap();
        controller.apply(CatalogResponse::failed(search, NetworkFailure::Status { status: 503 }));

        let retried = controller.retry().unwrap();
        assert_eq!(
            retried.query,
            CatalogQuery::ByTitle { title: "Heat".to_string(), page: 0, size: 20 }
        );
        assert_eq!(controller.state().mode(), Mode::Loading);

        controller.apply(CatalogResponse::movies(retried, movies(1, "heat")));
        assert_eq!(controller.state().mode(), Mode::Search);
        assert!(controller.state().notice().is_none());
    }

    #[test]
    fn list_query_answered_with_a_record_is_a_failure() {
        let (mut controller, request) = started();
        let detail = crate::domain::MovieDetail {
            summary: MovieSummary::new("tt1", "One"),
            plot: None,
            director: None,
            cast: None,
        };

        let settlement = controller.apply(CatalogResponse::detail(request, detail));

        assert!(matches!(settlement, Settlement::Failed(NetworkFailure::Decode(_))));
        assert_eq!(controller.state().mode(), Mode::Idle);
    }
}
