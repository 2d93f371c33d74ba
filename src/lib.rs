pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod llm;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod sitemap;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::DigestConfig;
pub use error::{DigestError, Result};
pub use llm::{Generator, OllamaClient};
pub use pipeline::Pipeline;
pub use results::{EventSummary, ListingFailure, ListingReport, RunReport, Stage};

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for a digest run over one sitemap
pub struct Digest {
    config: DigestConfig,
}

impl Digest {
    /// Create a new Digest builder for the sitemap at `sitemap_path`
    pub fn new(sitemap_path: impl Into<PathBuf>) -> Self {
        Self {
            config: DigestConfig::new(sitemap_path),
        }
    }

    /// Create a Digest builder from a complete configuration
    pub fn from_config(config: DigestConfig) -> Self {
        Self { config }
    }

    /// Select alternate links with this `hreflang`
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    /// Cap the number of processed URLs (None processes all of them)
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.config.limit = limit;
        self
    }

    /// Set the model name sent to the generation endpoint
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the generation endpoint base URL, overriding OLLAMA_URL
    pub fn with_ollama_url(mut self, url: impl Into<String>) -> Self {
        self.config.ollama_url = Some(url.into());
        self
    }

    /// Replace the whole configuration, keeping this builder's sitemap path
    pub fn with_config(mut self, config: DigestConfig) -> Self {
        let sitemap_path = std::mem::take(&mut self.config.sitemap_path);
        self.config = DigestConfig {
            sitemap_path,
            ..config
        };
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = DigestConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = DigestConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// The configuration the run will use
    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Build the generation client and pipeline, then run it
    pub async fn run(self) -> Result<RunReport> {
        let ollama_url = self.config.resolve_ollama_url();
        let generator = OllamaClient::with_timeout(
            &ollama_url,
            self.config.model.clone(),
            self.config.timeout_secs.map(Duration::from_secs),
        )?;
        match generator.endpoint() {
            Some(endpoint) => ::log::info!("Using model {} at {}", self.config.model, endpoint),
            None => ::log::warn!(
                "Generation endpoint {} is not a valid URL, every listing will fail",
                ollama_url
            ),
        }

        let pipeline = Pipeline::new(self.config, generator)?;
        Ok(pipeline.run().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="de">
<head><title>Flohmarkt am Hafen</title></head>
<body>
  <article>
    <h1>Flohmarkt am Hafen</h1>
    <p>Am ersten Sonntag im September findet wieder der große Flohmarkt an der Hafenpromenade
    statt. Von 8 bis 16 Uhr bieten private Händlerinnen und Händler Bücher, Schallplatten,
    Kleidung, Spielzeug und allerlei Trödel aus Keller und Dachboden an.</p>
    <p>Standplätze können bis Ende August im Bürgerbüro reserviert werden. Für Kinder gibt es
    eine eigene Ecke, in der sie ihre Spielsachen verkaufen oder tauschen können. Die Anreise
    mit dem Fahrrad oder dem Bus wird empfohlen, da die Parkplätze am Hafen begrenzt sind.</p>
    <p>Der Erlös der Standgebühren geht in diesem Jahr an den Förderverein der Grundschule am
    Deich. Für Kaffee, Kuchen und belegte Brötchen sorgt der Elternbeirat, und ab mittags spielt
    die Blaskapelle des Sportvereins ein kleines Platzkonzert auf der Wiese neben dem Leuchtturm.</p>
  </article>
</body>
</html>"#;

    #[test]
    fn test_builder_overrides() {
        let digest = Digest::new("events.xml")
            .with_language("en")
            .with_limit(None)
            .with_model("mistral")
            .with_ollama_url("http://gpu-box:11434");

        let config = digest.config();
        assert_eq!(config.sitemap_path, PathBuf::from("events.xml"));
        assert_eq!(config.language, "en");
        assert_eq!(config.limit, None);
        assert_eq!(config.model, "mistral");
        assert_eq!(config.ollama_url.as_deref(), Some("http://gpu-box:11434"));
    }

    #[test]
    fn test_config_str_keeps_sitemap_path() {
        let digest = Digest::new("events.xml")
            .with_config_str(r#"{"sitemap_path": "other.xml", "limit": 2}"#)
            .unwrap();

        assert_eq!(digest.config().sitemap_path, PathBuf::from("events.xml"));
        assert_eq!(digest.config().limit, Some(2));
    }

    #[tokio::test]
    async fn test_run_with_missing_sitemap_is_empty() {
        let report = Digest::new("/nonexistent/sitemap.xml")
            .with_ollama_url("http://127.0.0.1:9")
            .run()
            .await
            .unwrap();

        assert_eq!(report.discovered, 0);
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test]
    async fn test_invalid_endpoint_fails_per_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/de/flohmarkt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
            .mount(&server)
            .await;

        let listing = format!("{}/de/flohmarkt", server.uri());
        let mut sitemap = tempfile::NamedTempFile::new().unwrap();
        write!(
            sitemap,
            r#"<urlset xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <url><xhtml:link hreflang="de" href="{listing}"/></url>
</urlset>"#
        )
        .unwrap();

        let report = Digest::new(sitemap.path())
            .with_ollama_url("undefined")
            .run()
            .await
            .unwrap();

        assert_eq!(report.discovered, 1);
        assert!(report.reports.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, listing);
        assert_eq!(report.failures[0].stage, Stage::Generate);
        assert!(report.failures[0].message.contains("undefined"));
    }
}
