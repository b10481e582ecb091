//! Failure notice line.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeInfo;

/// Renders the notice at `row`, or blanks the row when there is none.
pub fn render_notice(row: usize, notice: Option<&NoticeInfo>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let Some(notice) = notice else {
        print!("{}", " ".repeat(cols));
        return;
    };

    let text = truncate(&format!(" ⚠ {}", notice.message), cols);
    print!("{}", Theme::fg(&theme.colors.notice_fg));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
}
