use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for narrowing down the URLs found in the sitemap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// Only keep URLs on this domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_domain: Option<String>,

    /// Regex patterns for URLs to keep (if empty, all URLs are kept unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to drop (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl UrlFilterConfig {
    /// True when the config carries no rule at all
    pub fn is_empty(&self) -> bool {
        self.required_domain.is_none()
            && self.include_patterns.is_empty()
            && self.exclude_patterns.is_empty()
    }
}

/// URL filter that uses regex patterns and a domain rule to pick listing URLs
#[derive(Debug, Default)]
pub struct UrlFilter {
    config: UrlFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a URL passes every filtering rule
    pub fn accepts(&self, url: &Url) -> bool {
        if !self.is_in_domain_scope(url) {
            return false;
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty()
            || self.include_regexes.iter().any(|regex| regex.is_match(url_str))
    }

    /// Apply the filter to a URL list, keeping document order
    ///
    /// Without any rule the list is returned untouched, unparseable entries included.
    pub fn apply(&self, urls: Vec<String>) -> Vec<String> {
        if self.config.is_empty() {
            return urls;
        }

        let before = urls.len();
        let kept: Vec<String> = urls
            .into_iter()
            .filter(|candidate| match Url::parse(candidate) {
                Ok(url) => {
                    let accepted = self.accepts(&url);
                    if !accepted {
                        ::log::debug!("URL filter rejected: {}", candidate);
                    }
                    accepted
                }
                Err(e) => {
                    ::log::warn!("Dropping unparseable URL {}: {}", candidate, e);
                    false
                }
            })
            .collect();

        ::log::debug!("URL filter kept {} of {} urls", kept.len(), before);
        kept
    }

    /// Check if a URL is within the allowed domain scope
    fn is_in_domain_scope(&self, url: &Url) -> bool {
        match &self.config.required_domain {
            Some(required) => url.domain() == Some(required.as_str()),
            None => true,
        }
    }
}
