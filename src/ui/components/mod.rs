//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with loading marker, plus the tab line
//! - [`search`]: Search box (draft or committed query)
//! - [`table`]: Results table (TITLE, YEAR, RUNTIME, RATING, GENRES)
//! - [`empty`]: Empty state message
//! - [`notice`]: Failure notice line
//! - [`overlay`]: Detail overlay
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Search Bar - 3 lines, optional]
//! [Table Headers]
//! [Table Rows | Empty State]      ← overlay drawn on top of this area
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod notice;
mod overlay;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::{render_header, render_tabs};
use notice::render_notice;
use overlay::render_overlay;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`.
///
/// Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full discovery layout.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, theme);
    let body_top = current_row;

    match &vm.empty_state {
        Some(empty) => render_empty_state(body_top, empty, theme, cols),
        None => {
            render_table_rows(body_top, &vm.display_items, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    if let Some(overlay) = &vm.overlay {
        render_overlay(body_top, notice_row.saturating_sub(1), overlay, theme, cols);
    }

    render_notice(notice_row, vm.notice.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
