//! Header component renderer.
//!
//! Renders the title bar (with a loading marker while a fetch is in flight)
//! and the tab line beneath it.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Suffix appended to the title while loading.
const LOADING_MARKER: &str = " ⟳ loading…";

/// Renders the centered title bar at `row`.
///
/// Returns the next available row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let marker = if header.loading { LOADING_MARKER } else { "" };
    let title_len = header.title.chars().count() + marker.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    if header.loading {
        print!("{}", Theme::fg(&theme.colors.loading_fg));
        print!("{marker}");
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the tab markers at `row`, active tab bracketed and colored.
///
/// Returns the next available row.
pub fn render_tabs(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    for tab in &header.tabs {
        let label = if tab.active {
            format!(" [{}] ", tab.label)
        } else {
            format!("  {}  ", tab.label)
        };

        if tab.active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.tab_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
        used += label.chars().count();
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
