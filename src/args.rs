use clap::Parser;
use event_digest::DigestConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "event-digest")]
#[command(about = "Summarizes event listings from a sitemap with a local language model")]
#[command(version)]
pub struct Args {
    /// Sitemap XML file to read listing URLs from [default: ./sitemap.xml]
    pub sitemap: Option<PathBuf>,

    /// JSON configuration file; flags given on the command line override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the generation endpoint [default: http://localhost:11434]
    #[arg(long, env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// hreflang of the links to process [default: de]
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Maximum number of listings to process [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Process every listing found in the sitemap
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Model name [default: llama3.2]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Only process URLs matching this regex (repeatable)
    #[arg(long = "include", value_name = "REGEX")]
    pub include_patterns: Vec<String>,

    /// Skip URLs matching this regex (repeatable)
    #[arg(long = "exclude", value_name = "REGEX")]
    pub exclude_patterns: Vec<String>,
}

impl Args {
    /// Apply command-line overrides on top of a base configuration
    pub fn apply(self, mut config: DigestConfig) -> DigestConfig {
        if let Some(sitemap) = self.sitemap {
            config.sitemap_path = sitemap;
        }
        if let Some(url) = self.ollama_url {
            config.ollama_url = Some(url);
        }
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        if self.all {
            config.limit = None;
        } else if let Some(limit) = self.limit {
            config.limit = Some(limit);
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
        config.filter.include_patterns.extend(self.include_patterns);
        config.filter.exclude_patterns.extend(self.exclude_patterns);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "event-digest",
            "events.xml",
            "--lang",
            "en",
            "-n",
            "3",
            "--model",
            "mistral",
            "--exclude",
            "/archiv/",
        ]);
        let config = args.apply(DigestConfig::default());

        assert_eq!(config.sitemap_path, PathBuf::from("events.xml"));
        assert_eq!(config.language, "en");
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.model, "mistral");
        assert_eq!(config.filter.exclude_patterns, vec!["/archiv/"]);
    }

    #[test]
    fn test_all_removes_limit() {
        let args = Args::parse_from(["event-digest", "--all"]);
        let config = args.apply(DigestConfig::default());
        assert_eq!(config.limit, None);
        assert_eq!(config.sitemap_path, PathBuf::from("./sitemap.xml"));
    }

    #[test]
    fn test_all_conflicts_with_limit() {
        let result = Args::try_parse_from(["event-digest", "--all", "--limit", "2"]);
        assert!(result.is_err());
    }
}
