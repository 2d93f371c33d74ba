use std::time::Duration;

/// Shortens text for log output, cutting on a char boundary
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}… ({} chars total)", &text[..cut], text.chars().count()),
        None => text.to_string(),
    }
}

/// Formats a duration the way timing lines are logged
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.2}s", secs)
    }
}
