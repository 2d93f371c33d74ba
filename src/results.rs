use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Structured summary of one event listing, as produced by the model
///
/// Model output is loosely typed: missing fields default to empty, scalars
/// are rendered as strings and `tags` may arrive as a comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub date: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub location: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub summary: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub category: String,

    #[serde(default, deserialize_with = "loose_tags")]
    pub tags: Vec<String>,
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_to_string(other).unwrap_or_default(),
    })
}

fn loose_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        other => scalar_to_string(other).into_iter().collect(),
    })
}

/// A successfully summarized listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingReport {
    /// URL of the listing page
    pub url: String,

    /// Summary returned by the model
    #[serde(flatten)]
    pub summary: EventSummary,

    /// Time spent on this listing
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Pipeline stage at which a listing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetch,
    Extract,
    Generate,
    Parse,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Generate => "generate",
            Stage::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// A listing that could not be summarized
#[derive(Debug, Clone, Serialize)]
pub struct ListingFailure {
    pub url: String,
    pub stage: Stage,
    pub message: String,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of URLs found in the sitemap after filtering
    pub discovered: usize,
    pub reports: Vec<ListingReport>,
    pub failures: Vec<ListingFailure>,
}

impl RunReport {
    /// Number of URLs that were attempted
    pub fn attempted(&self) -> usize {
        self.reports.len() + self.failures.len()
    }
}
