//! Application state management and view model computation.
//!
//! [`AppState`] wraps the [`DiscoveryController`] with the purely local UI
//! state the controller does not care about: cursor position, input routing,
//! the unsent search draft and the theme. View models are computed on demand
//! from a state snapshot.
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{AppState, DiscoverySettings};
//! use cinedex::ui::Theme;
//!
//! let (state, actions) = AppState::start(DiscoverySettings::default(), Theme::default());
//! assert_eq!(actions.len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.header.loading);
//! ```

use super::discovery::{DiscoveryController, DiscoverySettings};
use super::modes::{InputMode, Mode};
use crate::app::Action;
use crate::domain::{MovieSummary, Selection};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, NoticeInfo, OverlayInfo, SearchBarInfo,
    TabInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Width of the TITLE column.
pub const TITLE_COLUMN_WIDTH: usize = 40;

/// Genres listed per row; the overlay lists all of them.
const GENRES_PER_ROW: usize = 3;

/// Rows not available to the table: the blank top row, header, tabs, both
/// borders, column headers, notice, footer and the last terminal row.
const CHROME_ROWS: usize = 9;

/// Extra rows taken by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Owner of the discovery state; the only writer of results and overlay.
    pub controller: DiscoveryController,

    /// Zero-based cursor row within the committed results.
    ///
    /// Reset to the top on every commit; wraps during navigation.
    pub cursor: usize,

    pub input_mode: InputMode,

    /// Text being typed; only becomes a query when submitted.
    pub search_draft: String,

    pub theme: Theme,
}

impl AppState {
    /// Creates the state and returns the startup actions (the implicit top
    /// rated fetch).
    #[must_use]
    pub fn start(settings: DiscoverySettings, theme: Theme) -> (Self, Vec<Action>) {
        let (controller, initial) = DiscoveryController::start(settings);
        let state = Self {
            controller,
            cursor: 0,
            input_mode: InputMode::Browsing,
            search_draft: String::new(),
            theme,
        };
        (state, vec![Action::Fetch(initial)])
    }

    /// Moves the cursor down by one row, wrapping to the top at the end.
    pub fn move_cursor_down(&mut self) {
        let len = self.controller.state().results().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up by one row, wrapping to the bottom at the start.
    pub fn move_cursor_up(&mut self) {
        let len = self.controller.state().results().len();
        if len == 0 {
            return;
        }
        if self.cursor == 0 {
            self.cursor = len - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Movie under the cursor, if the result set is not empty.
    #[must_use]
    pub fn movie_under_cursor(&self) -> Option<&MovieSummary> {
        self.controller.state().results().get(self.cursor)
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// The table shows a window of results centered on the cursor, shifted to
    /// stay full near either end of the list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let discovery = self.controller.state();
        let results = discovery.results();

        let mut viewmodel = UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            notice: discovery.notice().map(|notice| NoticeInfo {
                message: format!("{} (press r to retry)", notice.message()),
            }),
            overlay: discovery.selected().map(Self::compute_overlay),
        };

        if results.is_empty() {
            return viewmodel;
        }

        let available_rows = Self::calculate_available_rows(rows, viewmodel.search_bar.is_some());
        let cursor = self.cursor.min(results.len() - 1);

        let mut visible_start = cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(results.len());

        if visible_end - visible_start < available_rows && results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = self.highlight_query().map(|query| (SkimMatcherV2::default(), query));

        viewmodel.display_items = results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, movie)| {
                let is_selected = visible_start + relative_idx == cursor;
                Self::compute_display_item(movie, is_selected, cols, matcher.as_ref())
            })
            .collect();
        viewmodel.selected_index = cursor - visible_start;

        viewmodel
    }

    /// Query whose matches are highlighted: the committed search, but only
    /// while search results are the settled view.
    fn highlight_query(&self) -> Option<&str> {
        let discovery = self.controller.state();
        let query = discovery.query().trim();
        (self.controller.settled_mode() == Mode::Search && !query.is_empty()).then_some(query)
    }

    fn compute_display_item(
        movie: &MovieSummary,
        is_selected: bool,
        cols: usize,
        matcher: Option<&(SkimMatcherV2, &str)>,
    ) -> DisplayItem {
        let title_width = TITLE_COLUMN_WIDTH.min(cols.saturating_sub(2)).max(1);
        let title = truncate(&movie.title, title_width.saturating_sub(2));

        let highlight_ranges = matcher
            .map_or_else(Vec::new, |(matcher, query)| compute_highlight_ranges(&title, query, matcher));

        let genres = movie
            .genres
            .iter()
            .take(GENRES_PER_ROW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        DisplayItem {
            title,
            year: movie.release_year.map(|y| y.to_string()).unwrap_or_default(),
            runtime: movie.runtime_label().unwrap_or_default(),
            rating: movie.rating_label().map(|r| format!("★ {r}")).unwrap_or_default(),
            genres,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let discovery = self.controller.state();
        let settled = self.controller.settled_mode();
        let searched = !discovery.query().is_empty();

        let showing_top = settled == Mode::Top || (settled == Mode::Empty && !searched);
        let showing_search = settled == Mode::Search || (settled == Mode::Empty && searched);

        let title = if showing_top {
            "Top Rated Movies".to_string()
        } else if showing_search {
            format!("Search Results ({})", discovery.results().len())
        } else {
            "Cinedex".to_string()
        };

        HeaderInfo {
            title,
            tabs: vec![
                TabInfo { label: "t: Top Rated".to_string(), active: showing_top },
                TabInfo { label: "/: Search".to_string(), active: showing_search },
            ],
            loading: discovery.mode() == Mode::Loading,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.controller.state().selected().is_some() {
            "Esc: close details  q: quit"
        } else {
            match self.input_mode {
                InputMode::Editing => "Enter: search  Esc: cancel  Type to edit the title",
                InputMode::Browsing if self.controller.state().notice().is_some() => {
                    "j/k: navigate  Enter: details  t: top rated  /: search  r: retry  q: quit"
                }
                InputMode::Browsing => {
                    "j/k: navigate  Enter: details  t: top rated  /: search  q: quit"
                }
            }
        };

        FooterInfo { keybindings: keybindings.to_string() }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Editing => Some(SearchBarInfo {
                query: self.search_draft.clone(),
                editing: true,
            }),
            InputMode::Browsing => {
                let query = self.controller.state().query();
                (!query.is_empty()).then(|| SearchBarInfo {
                    query: query.to_string(),
                    editing: false,
                })
            }
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let discovery = self.controller.state();
        if !discovery.results().is_empty() {
            return None;
        }

        let (message, subtitle) = match discovery.mode() {
            Mode::Empty => (
                "No movies found",
                "Try searching for a different movie or explore top rated movies",
            ),
            Mode::Loading => ("Loading movies", "Asking the catalog"),
            Mode::Idle | Mode::Top | Mode::Search => {
                ("Catalog unavailable", "Press r to retry or t for top rated movies")
            }
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_overlay(selection: &Selection) -> OverlayInfo {
        let summary = selection.summary();
        let detail = selection.detail();

        let facts = [
            summary.release_year.map(|y| y.to_string()),
            summary.runtime_label(),
            (!summary.genres.is_empty()).then(|| summary.genres.join(", ")),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

        let rating = summary.rating_label().map(|rating| match summary.vote_count {
            Some(votes) => format!("★ {rating} ({} votes)", group_thousands(votes)),
            None => format!("★ {rating}"),
        });

        OverlayInfo {
            title: summary.title.clone(),
            facts,
            rating,
            plot: selection.plot().map(str::to_string),
            director: detail.and_then(|d| d.director.clone()),
            cast: detail.and_then(|d| d.cast.clone()),
            has_poster: summary.has_poster(),
        }
    }

    const fn calculate_available_rows(total_rows: usize, search_bar: bool) -> usize {
        if search_bar {
            total_rows.saturating_sub(CHROME_ROWS + SEARCH_BAR_ROWS)
        } else {
            total_rows.saturating_sub(CHROME_ROWS)
        }
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Formats `2900000` as `2,900,000`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
