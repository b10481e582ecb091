//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point through which the plugin runtime
//! changes application state. Key presses and settled catalog requests both
//! arrive here as [`Event`]s; the handler updates [`AppState`] and returns
//! whether a redraw is needed together with the [`Action`]s to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenMovie`, `CloseOverlay`
//! - **Input**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `Escape`
//! - **Commands**: `ShowTopRated`, `Retry`, `CloseFocus`
//! - **Catalog**: `CatalogResponse` with the settled request
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{handle_event, Action, AppState, DiscoverySettings, Event};
//! use cinedex::ui::Theme;
//!
//! let (mut state, _) = AppState::start(DiscoverySettings::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, Event::ShowTopRated)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), cinedex::CinedexError>(())
//! ```

use super::discovery::Settlement;
use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::catalog::CatalogResponse;
use crate::domain::error::Result;

/// Events triggered by user input or by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the cursor down by one row (wraps to top).
    KeyDown,
    /// Moves the cursor up by one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Requests the top rated list.
    ShowTopRated,
    /// Starts editing the search draft.
    SearchMode,
    /// Appends a character to the search draft.
    Char(char),
    /// Removes the last character from the search draft.
    Backspace,
    /// Submits the search draft.
    SubmitSearch,
    /// Closes the overlay, or cancels editing when no overlay is open.
    Escape,

    /// Opens the detail overlay for the movie under the cursor.
    OpenMovie,
    /// Closes the detail overlay.
    CloseOverlay,
    /// Re-issues the main fetch that last failed.
    Retry,

    /// A catalog request has settled (successfully or not).
    CatalogResponse(CatalogResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently infallible; the `Result` is kept so the runtime treats every
/// handler the same way.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = event.name(),
        mode = ?state.controller.state().mode()
    )
    .entered();

    match event {
        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ShowTopRated => {
            state.input_mode = InputMode::Browsing;
            let request = state.controller.load_top_rated();
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search editing");
            state.input_mode = InputMode::Editing;
            state.search_draft = state.controller.state().query().to_string();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.search_draft.push(c);
            tracing::trace!(draft = %state.search_draft, "search draft updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.search_draft.pop();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            match state.controller.search(&state.search_draft) {
                Some(request) => {
                    state.input_mode = InputMode::Browsing;
                    Ok((true, vec![Action::Fetch(request)]))
                }
                None => Ok((false, vec![])),
            }
        }
        Event::Escape => {
            if state.controller.state().selected().is_some() {
                state.controller.close_overlay();
                return Ok((true, vec![]));
            }
            if state.input_mode == InputMode::Editing {
                tracing::debug!(draft = %state.search_draft, "search editing cancelled");
                state.input_mode = InputMode::Browsing;
                state.search_draft.clear();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::OpenMovie => {
            let Some(movie) = state.movie_under_cursor().cloned() else {
                tracing::debug!("no movie under cursor");
                return Ok((false, vec![]));
            };
            let request = state.controller.select_movie(movie);
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::CloseOverlay => {
            state.controller.close_overlay();
            Ok((true, vec![]))
        }
        Event::Retry => match state.controller.retry() {
            Some(request) => Ok((true, vec![Action::Fetch(request)])),
            None => Ok((false, vec![])),
        },
        Event::CatalogResponse(response) => {
            let settlement = state.controller.apply(response);
            if matches!(settlement, Settlement::Committed { .. }) {
                state.cursor = 0;
            }
            Ok((settlement.changed_view(), vec![]))
        }
    }
}

impl Event {
    /// Payload-free label used as a span field.
    const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::CloseFocus => "close_focus",
            Self::ShowTopRated => "show_top_rated",
            Self::SearchMode => "search_mode",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::SubmitSearch => "submit_search",
            Self::Escape => "escape",
            Self::OpenMovie => "open_movie",
            Self::CloseOverlay => "close_overlay",
            Self::Retry => "retry",
            Self::CatalogResponse(_) => "catalog_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DiscoverySettings, Mode};
    use crate::catalog::{CatalogQuery, CatalogRequest};
    use crate::domain::{MovieSummary, NetworkFailure};
    use crate::ui::Theme;

    fn started() -> (AppState, CatalogRequest) {
        let (state, actions) = AppState::start(DiscoverySettings::default(), Theme::default());
        let request = match actions.as_slice() {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("unexpected startup actions: {other:?}"),
        };
        (state, request)
    }

    fn fetched(actions: &[Action]) -> &CatalogRequest {
        match actions {
            [Action::Fetch(request)] => request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn movies(n: usize) -> Vec<MovieSummary> {
        (0..n).map(|i| MovieSummary::new(format!("tt{i}"), format!("Movie {i}"))).collect()
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn typing_and_submitting_issues_a_search() {
        let (mut state, _) = started();

        handle_event(&mut state, Event::SearchMode).unwrap();
        type_text(&mut state, "Heat");
        let (_, actions) = handle_event(&mut state, Event::SubmitSearch).unwrap();

        assert_eq!(
            fetched(&actions).query,
            CatalogQuery::ByTitle { title: "Heat".to_string(), page: 0, size: 20 }
        );
        assert_eq!(state.input_mode, InputMode::Browsing);
    }

    #[test]
    fn blank_submit_keeps_editing_and_fetches_nothing() {
        let (mut state, _) = started();

        handle_event(&mut state, Event::SearchMode).unwrap();
        type_text(&mut state, "  ");
        let (render, actions) = handle_event(&mut state, Event::SubmitSearch).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Editing);
    }

    #[test]
    fn chars_outside_editing_are_ignored() {
        let (mut state, _) = started();
        let (render, _) = handle_event(&mut state, Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_draft.is_empty());
    }

    #[test]
    fn commit_resets_the_cursor() {
        let (mut state, request) = started();
        handle_event(&mut state, Event::CatalogResponse(CatalogResponse::movies(request, movies(5)))).unwrap();
        handle_event(&mut state, Event::KeyDown).unwrap();
        handle_event(&mut state, Event::KeyDown).unwrap();
        assert_eq!(state.cursor, 2);

        let (_, actions) = handle_event(&mut state, Event::ShowTopRated).unwrap();
        let request = fetched(&actions).clone();
        handle_event(&mut state, Event::CatalogResponse(CatalogResponse::movies(request, movies(3)))).unwrap();

        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn open_movie_fetches_detail_for_cursor_row() {
        let (mut state, request) = started();
        handle_event(&mut state, Event::CatalogResponse(CatalogResponse::movies(request, movies(3)))).unwrap();
        handle_event(&mut state, Event::KeyUp).unwrap();

        let (_, actions) = handle_event(&mut state, Event::OpenMovie).unwrap();

        assert_eq!(fetched(&actions).query, CatalogQuery::Detail { id: "tt2".to_string() });
        assert_eq!(
            state.controller.state().selected().map(crate::domain::Selection::id),
            Some("tt2")
        );
    }

    #[test]
    fn escape_closes_overlay_before_leaving_edit_mode() {
        let (mut state, request) = started();
        handle_event(&mut state, Event::CatalogResponse(CatalogResponse::movies(request, movies(1)))).unwrap();
        handle_event(&mut state, Event::SearchMode).unwrap();
        handle_event(&mut state, Event::OpenMovie).unwrap();

        handle_event(&mut state, Event::Escape).unwrap();
        assert!(state.controller.state().selected().is_none());
        assert_eq!(state.input_mode, InputMode::Editing);

        handle_event(&mut state, Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Browsing);
    }

    #[test]
    fn stale_response_does_not_request_render() {
        let (mut state, first) = started();
        handle_event(&mut state, Event::ShowTopRated).unwrap();

        let (render, _) =
            handle_event(&mut state, Event::CatalogResponse(CatalogResponse::movies(first, movies(2)))).unwrap();

        assert!(!render);
        assert_eq!(state.controller.state().mode(), Mode::Loading);
    }

    #[test]
    fn retry_after_failure_fetches_again() {
        let (mut state, request) = started();
        let (_, nothing) = handle_event(&mut state, Event::Retry).unwrap();
        assert!(nothing.is_empty());

        handle_event(
            &mut state,
            Event::CatalogResponse(CatalogResponse::failed(request, NetworkFailure::Status { status: 500 })),
        )
        .unwrap();
        let (_, actions) = handle_event(&mut state, Event::Retry).unwrap();

        assert_eq!(fetched(&actions).query, CatalogQuery::TopRated { limit: 20 });
    }

    #[test]
    fn close_focus_hides_the_plugin() {
        let (mut state, _) = started();
        let (render, actions) = handle_event(&mut state, Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
