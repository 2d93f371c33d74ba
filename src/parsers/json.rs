use crate::error::{DigestError, Result};
use crate::results::EventSummary;
use regex::Regex;
use std::sync::LazyLock;

// Greedy: first `{` up to the last `}`, across newlines.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Returns the first JSON-looking object span in model output
pub fn find_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Decodes the event summary embedded in model output
pub fn parse_event_summary(text: &str) -> Result<EventSummary> {
    let span = find_json_object(text).ok_or(DigestError::NoJsonObject)?;
    Ok(serde_json::from_str(span)?)
}
