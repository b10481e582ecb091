//! Detail overlay renderer.
//!
//! Draws a framed box centered over the results table. Only known fields are
//! drawn: plot, director and cast appear once the detail record supplies
//! them, and a failed lookup simply leaves the summary lines.

use crate::ui::helpers::{position_cursor, print_padded, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayInfo;

/// Columns left free on each side of the overlay.
const OVERLAY_MARGIN: usize = 4;

/// Styled content line inside the frame.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Title(String),
    Rating(String),
    Text(String),
    Dim(String),
    Blank,
}

/// Renders the overlay between `top` and `bottom` (inclusive rows).
pub fn render_overlay(top: usize, bottom: usize, overlay: &OverlayInfo, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(OVERLAY_MARGIN * 2);
    if width < 10 || bottom <= top + 2 {
        return;
    }
    let inner = width - 4;
    let max_lines = bottom - top - 1;

    let lines = overlay_lines(overlay, inner);
    let shown = lines.len().min(max_lines);
    let left = " ".repeat(OVERLAY_MARGIN);

    position_cursor(top, 1);
    print!("{left}{}", Theme::fg(&theme.colors.overlay_border));
    print!("╭{}╮", "─".repeat(width - 2));
    print!("{}", Theme::reset());

    for (offset, line) in lines.iter().take(shown).enumerate() {
        position_cursor(top + 1 + offset, 1);
        print!("{left}{}│ {}", Theme::fg(&theme.colors.overlay_border), Theme::reset());
        render_line(line, inner, theme);
        print!("{} │{}", Theme::fg(&theme.colors.overlay_border), Theme::reset());
    }

    position_cursor(top + 1 + shown, 1);
    print!("{left}{}", Theme::fg(&theme.colors.overlay_border));
    print!("╰{}╯", "─".repeat(width - 2));
    print!("{}", Theme::reset());
}

fn render_line(line: &Line, inner: usize, theme: &Theme) {
    match line {
        Line::Title(text) => {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
            print_padded(text, inner);
        }
        Line::Rating(text) => {
            print!("{}", Theme::fg(&theme.colors.rating_fg));
            print_padded(text, inner);
        }
        Line::Text(text) => {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print_padded(text, inner);
        }
        Line::Dim(text) => {
            print!("{}{}", Theme::italic(), Theme::fg(&theme.colors.text_dim));
            print_padded(text, inner);
        }
        Line::Blank => print_padded("", inner),
    }
    print!("{}", Theme::reset());
}

fn overlay_lines(overlay: &OverlayInfo, inner: usize) -> Vec<Line> {
    let mut lines = vec![Line::Title(truncate(&overlay.title, inner))];

    if !overlay.facts.is_empty() {
        lines.push(Line::Dim(truncate(&overlay.facts, inner)));
    }
    if let Some(rating) = &overlay.rating {
        lines.push(Line::Rating(truncate(rating, inner)));
    }
    lines.push(Line::Blank);

    if let Some(plot) = &overlay.plot {
        lines.extend(wrap_text(plot, inner).into_iter().map(Line::Text));
        lines.push(Line::Blank);
    }
    if let Some(director) = &overlay.director {
        lines.push(Line::Text(truncate(&format!("Director: {director}"), inner)));
    }
    if let Some(cast) = &overlay.cast {
        let wrapped = wrap_text(&format!("Cast: {cast}"), inner);
        lines.extend(wrapped.into_iter().map(Line::Text));
    }

    let poster = if overlay.has_poster { "Poster available" } else { "No poster" };
    lines.push(Line::Dim(poster.to_string()));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_only() -> OverlayInfo {
        OverlayInfo {
            title: "The Matrix".to_string(),
            facts: "1999 · 2h 16m".to_string(),
            rating: Some("★ 8.7".to_string()),
            plot: None,
            director: None,
            cast: None,
            has_poster: false,
        }
    }

    #[test]
    fn summary_only_overlay_has_no_placeholder_lines() {
        let lines = overlay_lines(&summary_only(), 60);

        assert_eq!(
            lines,
            vec![
                Line::Title("The Matrix".to_string()),
                Line::Dim("1999 · 2h 16m".to_string()),
                Line::Rating("★ 8.7".to_string()),
                Line::Blank,
                Line::Dim("No poster".to_string()),
            ]
        );
    }

    #[test]
    fn detail_fields_are_listed_when_known() {
        let overlay = OverlayInfo {
            plot: Some("A hacker learns the truth.".to_string()),
            director: Some("The Wachowskis".to_string()),
            ..summary_only()
        };

        let lines = overlay_lines(&overlay, 60);

        assert!(lines.contains(&Line::Text("A hacker learns the truth.".to_string())));
        assert!(lines.contains(&Line::Text("Director: The Wachowskis".to_string())));
        assert!(!lines.iter().any(|line| matches!(line, Line::Text(t) if t.starts_with("Cast:"))));
    }
}
