//! Results table renderer.
//!
//! Five columns: TITLE, YEAR, RUNTIME, RATING, GENRES. The title column is
//! fixed width; GENRES takes what is left of the line.

use crate::app::state::TITLE_COLUMN_WIDTH;
use crate::ui::helpers::{self, position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const YEAR_WIDTH: usize = 6;
const RUNTIME_WIDTH: usize = 9;
const RATING_WIDTH: usize = 8;

/// Renders the column headers at `row`.
///
/// Returns the next available row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" ");
    print_padded("TITLE", TITLE_COLUMN_WIDTH - 1);
    print_padded("YEAR", YEAR_WIDTH);
    print_padded("RUNTIME", RUNTIME_WIDTH);
    print_padded("RATING", RATING_WIDTH);
    print!("GENRES");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`.
///
/// Returns the next available row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to the full width so the selection background
/// covers the whole line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_fg = if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base_fg));

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat((TITLE_COLUMN_WIDTH - 1).saturating_sub(item.title.chars().count())));

    print_padded(&item.year, YEAR_WIDTH);
    print_padded(&item.runtime, RUNTIME_WIDTH);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print_padded(&item.rating, RATING_WIDTH);
    print!("{}", Theme::fg(base_fg));

    let used = TITLE_COLUMN_WIDTH + YEAR_WIDTH + RUNTIME_WIDTH + RATING_WIDTH;
    let genres = truncate(&item.genres, cols.saturating_sub(used));
    print_padded(&genres, cols.saturating_sub(used));

    print!("{}", Theme::reset());
    row + 1
}
