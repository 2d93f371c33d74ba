use event_digest::Digest;
use std::error::Error;

/// Summarizes the first two German listings of a sitemap with a JSON config
///
/// Usage: cargo run --example digest_builder -- <sitemap.xml> [config.json]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let sitemap = args.next().unwrap_or_else(|| "./sitemap.xml".to_string());

    let mut digest = Digest::new(&sitemap);
    if let Some(config_file) = args.next() {
        println!("Loading configuration from file: {}", config_file);
        digest = digest.with_config_file(config_file)?;
    }

    let report = digest.with_language("de").with_limit(Some(2)).run().await?;

    for listing in &report.reports {
        println!(
            "{} -> {} ({})",
            listing.url, listing.summary.title, listing.summary.category
        );
    }
    for failure in &report.failures {
        println!(
            "{} failed at {}: {}",
            failure.url, failure.stage, failure.message
        );
    }

    Ok(())
}
