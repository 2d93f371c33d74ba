use crate::error::{DigestError, Result};
use crate::filter::UrlFilterConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable holding the base URL of the generation endpoint
pub const OLLAMA_URL_ENV: &str = "OLLAMA_URL";

/// Configuration for a digest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Path of the sitemap XML file
    #[serde(default = "default_sitemap_path")]
    pub sitemap_path: PathBuf,

    /// `hreflang` value selecting which alternate links to process
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of URLs to process (None processes all of them)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,

    /// Model name sent with every generation request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation endpoint
    #[serde(default)]
    pub ollama_url: Option<String>,

    /// Request timeout in seconds for page fetches and generation
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Categories the model must choose from
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Filter applied to discovered URLs
    #[serde(default)]
    pub filter: UrlFilterConfig,
}

/// Default sitemap location
fn default_sitemap_path() -> PathBuf {
    PathBuf::from("./sitemap.xml")
}

/// Default hreflang
fn default_language() -> String {
    "de".to_string()
}

/// Default URL cap
fn default_limit() -> Option<usize> {
    Some(5)
}

/// Default model
fn default_model() -> String {
    "llama3.2".to_string()
}

/// Default endpoint when OLLAMA_URL is not set
pub fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Default category list
fn default_categories() -> Vec<String> {
    [
        "Konzert",
        "Theater",
        "Ausstellung",
        "Festival",
        "Lesung",
        "Film",
        "Sport",
        "Markt",
        "Workshop",
        "Führung",
        "Kinder & Familie",
        "Sonstiges",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self::new(default_sitemap_path())
    }
}

impl DigestConfig {
    /// Create a configuration with default values for the given sitemap
    pub fn new(sitemap_path: impl Into<PathBuf>) -> Self {
        Self {
            sitemap_path: sitemap_path.into(),
            language: default_language(),
            limit: default_limit(),
            model: default_model(),
            ollama_url: None,
            timeout_secs: None,
            categories: default_categories(),
            filter: UrlFilterConfig::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| DigestError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(DigestError::Config(
                "language must not be empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(DigestError::Config("model must not be empty".to_string()));
        }
        if self.categories.is_empty() {
            return Err(DigestError::Config(
                "at least one category is required".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured endpoint, then OLLAMA_URL, then the local default
    pub fn resolve_ollama_url(&self) -> String {
        if let Some(url) = self.ollama_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.to_string();
        }

        match std::env::var(OLLAMA_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                let fallback = default_ollama_url();
                ::log::warn!("{} is not set, using {}", OLLAMA_URL_ENV, fallback);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DigestConfig::default();
        assert_eq!(config.sitemap_path, PathBuf::from("./sitemap.xml"));
        assert_eq!(config.language, "de");
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.model, "llama3.2");
        assert!(config.ollama_url.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.categories.contains(&"Sonstiges".to_string()));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = DigestConfig::from_json(r#"{"language": "en", "limit": null}"#).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.limit, None);
        assert_eq!(config.model, "llama3.2");
        assert!(config.filter.include_patterns.is_empty());
    }

    #[test]
    fn test_from_json_rejects_empty_categories() {
        let result = DigestConfig::from_json(r#"{"categories": []}"#);
        assert!(matches!(result, Err(DigestError::Config(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = DigestConfig::from_file("/nonexistent/digest.json");
        assert!(matches!(result, Err(DigestError::Io { .. })));
    }

    #[test]
    fn test_explicit_ollama_url_wins() {
        let mut config = DigestConfig::default();
        config.ollama_url = Some("http://gpu-box:11434".to_string());
        assert_eq!(config.resolve_ollama_url(), "http://gpu-box:11434");
    }
}
