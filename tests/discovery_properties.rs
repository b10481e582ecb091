//! Property-based tests for discovery ordering invariants.
//!
//! Arbitrary interleavings of issued fetches and out-of-order completions
//! must never let an older response overwrite a newer one, and must never
//! clear the visible results while a fetch is in flight.

use cinedex::app::{DiscoveryController, DiscoverySettings, Mode, Settlement};
use cinedex::catalog::{CatalogQuery, CatalogRequest, CatalogResponse};
use cinedex::{MovieDetail, MovieSummary, NetworkFailure};
use proptest::prelude::*;

// ──────────────────── strategies ────────────────────

#[derive(Debug, Clone)]
enum Step {
    TopRated,
    Search(u8),
    Open(u8),
    Close,
    Retry,
    /// Completes the outstanding request at `index % outstanding.len()`.
    Complete { index: usize, outcome: Outcome },
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Movies(u8),
    Failure,
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        3 => (0u8..4).prop_map(Outcome::Movies),
        1 => Just(Outcome::Failure),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::TopRated),
        2 => (0u8..5).prop_map(Step::Search),
        1 => (0u8..5).prop_map(Step::Open),
        1 => Just(Step::Close),
        1 => Just(Step::Retry),
        5 => (any::<usize>(), arb_outcome()).prop_map(|(index, outcome)| Step::Complete { index, outcome }),
    ]
}

// ──────────────────── harness ────────────────────

/// Movies whose ids record the request that produced them.
fn movies_for(seq: u64, count: u8) -> Vec<MovieSummary> {
    (0..count)
        .map(|i| MovieSummary::new(format!("s{seq}-{i}"), format!("Movie {i} of request {seq}")))
        .collect()
}

fn is_detail(request: &CatalogRequest) -> bool {
    matches!(request.query, CatalogQuery::Detail { .. })
}

fn respond(request: CatalogRequest, outcome: Outcome) -> CatalogResponse {
    match (outcome, &request.query) {
        (Outcome::Failure, _) => CatalogResponse::failed(request, NetworkFailure::Status { status: 503 }),
        (Outcome::Movies(_), CatalogQuery::Detail { id }) => {
            let detail = MovieDetail {
                summary: MovieSummary::new(id.clone(), "Detailed"),
                plot: Some("Plot".to_string()),
                director: None,
                cast: None,
            };
            CatalogResponse::detail(request, detail)
        }
        (Outcome::Movies(count), _) => {
            let seq = request.seq;
            CatalogResponse::movies(request, movies_for(seq, count))
        }
    }
}

struct Harness {
    controller: DiscoveryController,
    outstanding: Vec<CatalogRequest>,
    last_committed: u64,
}

impl Harness {
    fn new() -> Self {
        let (controller, initial) = DiscoveryController::start(DiscoverySettings::default());
        Self {
            controller,
            outstanding: vec![initial],
            last_committed: 0,
        }
    }

    /// Records a newly issued request, checking that issuing a main fetch
    /// kept the visible results.
    fn issue(&mut self, before: &[MovieSummary], request: Option<CatalogRequest>) {
        let Some(request) = request else {
            return;
        };
        if !is_detail(&request) {
            assert_results_kept(before, self.controller.state().results());
            assert_eq!(self.controller.state().mode(), Mode::Loading);
        }
        self.outstanding.push(request);
    }

    fn run(&mut self, step: Step) {
        let before: Vec<MovieSummary> = self.controller.state().results().to_vec();

        match step {
            Step::TopRated => {
                let request = self.controller.load_top_rated();
                self.issue(&before, Some(request));
            }
            Step::Search(n) => {
                let request = self.controller.search(&format!("title {n}"));
                self.issue(&before, request);
            }
            Step::Open(n) => {
                let Some(movie) = before.get(usize::from(n)).cloned() else {
                    return;
                };
                let request = self.controller.select_movie(movie);
                self.issue(&before, Some(request));
            }
            Step::Close => self.controller.close_overlay(),
            Step::Retry => {
                let request = self.controller.retry();
                self.issue(&before, request);
            }
            Step::Complete { index, outcome } => {
                if self.outstanding.is_empty() {
                    return;
                }
                let request = self.outstanding.remove(index % self.outstanding.len());
                let seq = request.seq;
                let detail_lookup = is_detail(&request);

                let settlement = self.controller.apply(respond(request, outcome));

                if detail_lookup {
                    assert_results_kept(&before, self.controller.state().results());
                    return;
                }

                match settlement {
                    Settlement::Committed { count, .. } => {
                        assert_eq!(seq, self.controller.latest_seq(), "only the latest fetch commits");
                        assert!(seq > self.last_committed, "commits are monotonic");
                        self.last_committed = seq;
                        assert_eq!(self.controller.state().results(), movies_for(seq, count as u8).as_slice());
                    }
                    _ => assert_results_kept(&before, self.controller.state().results()),
                }
            }
        }
    }

    fn assert_invariants(&self) {
        let state = self.controller.state();
        assert_eq!(state.mode() == Mode::Loading, self.controller.is_fetching());
        assert!(self.controller.settled_mode().is_settled());
        assert!(state
            .results()
            .iter()
            .all(|movie| movie.id.starts_with(&format!("s{}-", self.last_committed))));
        if state.mode() == Mode::Empty {
            assert!(state.results().is_empty());
        }
    }
}

fn assert_results_kept(before: &[MovieSummary], after: &[MovieSummary]) {
    assert_eq!(before, after, "results changed without a commit");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any interleaving of fetches and completions keeps the newest commit.
    #[test]
    fn latest_issued_fetch_wins(steps in prop::collection::vec(arb_step(), 1..60)) {
        let mut harness = Harness::new();
        for step in steps {
            harness.run(step);
            harness.assert_invariants();
        }
    }

    /// Completing every request in reverse order commits only the newest.
    #[test]
    fn reverse_completion_commits_newest(searches in 1u8..8) {
        let mut harness = Harness::new();
        for n in 0..searches {
            harness.run(Step::Search(n));
        }
        let newest = harness.controller.latest_seq();

        while !harness.outstanding.is_empty() {
            let last = harness.outstanding.len() - 1;
            harness.run(Step::Complete { index: last, outcome: Outcome::Movies(2) });
            harness.assert_invariants();
        }

        prop_assert_eq!(harness.last_committed, newest);
        prop_assert_eq!(harness.controller.state().mode(), Mode::Search);
        prop_assert_eq!(harness.controller.state().query(), format!("title {}", searches - 1));
    }
}
