//! Shared rendering utilities and helpers.
//!
//! Text helpers here count characters, not bytes, so titles with accents or
//! CJK characters never split inside a code point.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max` characters, marking the cut with "...".
///
/// # Example
///
/// ```rust
/// use cinedex::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
/// assert_eq!(truncate("Up", 10), "Up");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Breaks `text` into lines of at most `width` characters at word boundaries.
///
/// Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When the row
/// is selected, match highlighting is skipped so it does not fight the
/// selection background.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Prints `text` left-aligned in a field of `width` characters.
pub fn print_padded(text: &str, width: usize) {
    let len = text.chars().count();
    print!("{text}{}", " ".repeat(width.saturating_sub(len)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 6), "Amélie");
        assert_eq!(truncate("Le Fabuleux Destin d'Amélie Poulain", 12), "Le Fabule...");
        assert_eq!(truncate("Alien", 2), "Al");
    }

    #[test]
    fn wrap_text_breaks_at_words() {
        let lines = wrap_text("Two imprisoned men bond over a number of years", 16);
        assert_eq!(lines, vec!["Two imprisoned", "men bond over a", "number of years"]);
    }

    #[test]
    fn wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij kl", 4), vec!["abcd", "efgh", "ij", "kl"]);
    }

    #[test]
    fn wrap_text_handles_degenerate_input() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("anything", 0).is_empty());
    }
}
