use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, fetching, extracting or summarizing listings
#[derive(Error, Debug)]
pub enum DigestError {
    /// Reading a file from disk failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sitemap is not well-formed XML
    #[error("Failed to parse sitemap XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The sitemap root element is not `urlset`
    #[error("Sitemap root element is <{0}>, expected <urlset>")]
    MissingUrlset(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No readable article could be extracted from the page
    #[error("No readable article found at {0}")]
    NotReadable(String),

    /// The generation endpoint reported an error inside its stream
    #[error("Model error: {0}")]
    Model(String),

    /// The generation stream ended without delivering a single chunk
    #[error("No response body")]
    EmptyResponse,

    /// The model output contains no `{...}` span
    #[error("Model output does not contain a JSON object")]
    NoJsonObject,

    /// JSON decoding failed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL filter pattern did not compile
    #[error("Invalid filter pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = DigestError::Status {
            url: "https://example.com/event".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/event responded with status 404"
        );
    }

    #[test]
    fn test_missing_urlset_display() {
        let err = DigestError::MissingUrlset("sitemapindex".to_string());
        assert!(err.to_string().contains("<sitemapindex>"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: DigestError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, DigestError::Json(_)));
    }
}
