//! String helpers for log output.

/// Single-line preview of `s`, at most `max_chars` characters.
///
/// Runs of whitespace (newlines included) collapse to one space so a raw
/// model reply fits on one log line. Longer text ends in `...`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
