use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::fetch;
use crate::filter::UrlFilter;
use crate::llm::{Generator, build_prompt};
use crate::parsers::{extract_readable, parse_event_summary};
use crate::results::{EventSummary, ListingFailure, ListingReport, RunReport, Stage};
use crate::sitemap;
use crate::utils;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Sequential sitemap -> page -> text -> model -> JSON pipeline
///
/// Every URL is processed to completion before the next one starts. A
/// failure is logged and recorded, then the loop moves on.
pub struct Pipeline<G> {
    config: DigestConfig,
    http: Client,
    filter: UrlFilter,
    generator: G,
}

impl<G: Generator> Pipeline<G> {
    /// Create a pipeline from a validated configuration and a generator
    pub fn new(config: DigestConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let http = fetch::build_client(config.timeout_secs.map(Duration::from_secs))?;
        let filter = UrlFilter::new(config.filter.clone())?;

        Ok(Self {
            config,
            http,
            filter,
            generator,
        })
    }

    /// Reads the sitemap and returns the filtered listing URLs
    ///
    /// Sitemap errors are logged and degrade to an empty list.
    pub fn discover(&self) -> Vec<String> {
        ::log::info!("Parsing sitemap {}", self.config.sitemap_path.display());

        match sitemap::load_sitemap(&self.config.sitemap_path, &self.config.language) {
            Ok(urls) => {
                let urls = self.filter.apply(urls);
                ::log::info!("Found {} urls to process", urls.len());
                urls
            }
            Err(e) => {
                ::log::error!("Failed to read sitemap: {} ({:?})", e, e);
                Vec::new()
            }
        }
    }

    /// Runs discovery followed by the processing loop
    pub async fn run(&self) -> RunReport {
        let urls = self.discover();
        self.run_urls(urls).await
    }

    /// Processes at most `limit` URLs, one after the other
    pub async fn run_urls(&self, urls: Vec<String>) -> RunReport {
        let mut report = RunReport {
            discovered: urls.len(),
            ..RunReport::default()
        };
        let cap = self.config.limit.unwrap_or(urls.len());

        if cap < urls.len() {
            ::log::info!("Processing the first {} of {} urls", cap, urls.len());
        }

        for url in urls.into_iter().take(cap) {
            match self.process(&url).await {
                Ok(listing) => report.reports.push(listing),
                Err(failure) => report.failures.push(failure),
            }
        }

        ::log::info!(
            "Done: {} summarized, {} failed",
            report.reports.len(),
            report.failures.len()
        );
        report
    }

    /// Fetches, extracts and summarizes a single listing
    pub async fn process(&self, url: &str) -> std::result::Result<ListingReport, ListingFailure> {
        ::log::info!("Processing {}", url);
        let start = Instant::now();
        let outcome = self.summarize(url).await;
        let elapsed = start.elapsed();
        ::log::info!("Processed {} in {}", url, utils::format_elapsed(elapsed));

        match outcome {
            Ok(summary) => {
                ::log::info!("Summary for {}: {:?}", url, summary);
                Ok(ListingReport {
                    url: url.to_string(),
                    summary,
                    elapsed,
                })
            }
            Err((stage, e)) => {
                ::log::error!("Error at {} stage for {}: {} ({:?})", stage, url, e, e);
                Err(ListingFailure {
                    url: url.to_string(),
                    stage,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn summarize(
        &self,
        url: &str,
    ) -> std::result::Result<EventSummary, (Stage, DigestError)> {
        let html = fetch::fetch_html(&self.http, url)
            .await
            .map_err(|e| (Stage::Fetch, e))?;

        ::log::info!("Extracting readable text");
        let readable = extract_readable(&html, Some(url))
            .ok_or_else(|| (Stage::Extract, DigestError::NotReadable(url.to_string())))?;
        ::log::debug!("Readable text has {} chars", readable.char_count());

        ::log::info!("Analyzing with {}", self.generator.name());
        let prompt = build_prompt(&readable.prompt_text(), &self.config.categories);
        let output = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| (Stage::Generate, e))?;
        ::log::debug!("Model output: {}", utils::preview(&output, 500));

        parse_event_summary(&output).map_err(|e| (Stage::Parse, e))
    }
}
