//! String helpers for log lines and console previews.

/// Collapse whitespace runs into single spaces and cap the result at
/// `max_len` bytes, appending `...` when cut. Never splits a UTF-8 character.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_len {
        return flat;
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}
