//! Text-mode field widgets.

use unicode_width::UnicodeWidthStr;

/// Minimum width of the text inside a `[...]` input box.
pub const INPUT_MIN_WIDTH: usize = 12;
/// Minimum inner width of a textarea box.
pub const TEXTAREA_MIN_WIDTH: usize = 24;

const SELECT_MARKER: &str = "▾";

/// `[content____]`
pub fn text_input(content: &str) -> String {
    format!("[{}]", pad(content, INPUT_MIN_WIDTH, '_'))
}

/// `[label ▾]`
pub fn select(label: &str) -> String {
    if label.is_empty() {
        return format!("[{} {SELECT_MARKER}]", pad("", INPUT_MIN_WIDTH, ' '));
    }
    format!("[{label} {SELECT_MARKER}]")
}

/// `(•) label` or `( ) label`
pub fn radio(checked: bool, label: &str) -> String {
    let marker = if checked { "(•)" } else { "( )" };
    if label.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {label}")
    }
}

/// A boxed multi-line input, one entry per output line.
pub fn text_area(content: &str) -> Vec<String> {
    let mut rows: Vec<&str> = content.lines().collect();
    if rows.is_empty() {
        rows.push("");
    }
    let width = rows
        .iter()
        .map(|row| row.width())
        .max()
        .unwrap_or(0)
        .max(TEXTAREA_MIN_WIDTH);
    let rule = "─".repeat(width + 2);

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format!("┌{rule}┐"));
    for row in rows {
        out.push(format!("│ {} │", pad(row, width, ' ')));
    }
    out.push(format!("└{rule}┘"));
    out
}

/// Comment affordance shown after a block.
pub const fn comment(read_only: bool) -> &'static str {
    if read_only {
        "[+ Add Comment]"
    } else {
        "[comments]"
    }
}

/// Pad `content` with `fill` up to `width` display columns.
fn pad(content: &str, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(content.width());
    let mut out = String::with_capacity(content.len() + missing);
    out.push_str(content);
    out.extend(std::iter::repeat_n(fill, missing));
    out
}
