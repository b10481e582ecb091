//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every
//! decision about what the discovery state means on screen is made while
//! building them, not while printing.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the results table inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Shown instead of the table when there are no results to list.
    pub empty_state: Option<EmptyState>,

    /// Present while editing or when a search has been committed.
    pub search_bar: Option<SearchBarInfo>,

    /// Failure line for the last main fetch.
    pub notice: Option<NoticeInfo>,

    /// Detail overlay, drawn on top of the table.
    pub overlay: Option<OverlayInfo>,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, already truncated to the column width.
    pub title: String,
    pub year: String,
    pub runtime: String,
    pub rating: String,
    /// First genres joined with ", ".
    pub genres: String,
    pub is_selected: bool,

    /// Character ranges of `title` matching the committed search.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header bar: title, tabs and loading marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<TabInfo>,
    /// A main fetch is in flight.
    pub loading: bool,
}

/// A tab marker in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub active: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current input routing.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Draft while editing, committed query otherwise.
    pub query: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub message: String,
}

/// Detail overlay content.
///
/// Built from whatever the overlay currently holds; detail-only fields stay
/// `None` unless the detail record arrived and carried them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    pub title: String,
    /// Year, runtime and genres joined by " · ".
    pub facts: String,
    /// Rating with vote count, e.g. "★ 9.3 (2,900,000 votes)".
    pub rating: Option<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub has_poster: bool,
}
