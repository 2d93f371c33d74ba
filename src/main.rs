use clap::Parser;
use event_digest::{Digest, DigestConfig};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, info and up unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match DigestConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => DigestConfig::default(),
    };
    let config = args.apply(base);

    ::log::info!(
        "Starting digest of {} (hreflang {})",
        config.sitemap_path.display(),
        config.language
    );

    let report = match Digest::from_config(config).run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Failed to start digest: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for listing in &report.reports {
        match serde_json::to_string_pretty(listing) {
            Ok(json) => println!("{json}"),
            Err(e) => ::log::error!("Failed to render summary for {}: {}", listing.url, e),
        }
    }

    ::log::info!(
        "Summarized {} of {} listings ({} discovered)",
        report.reports.len(),
        report.attempted(),
        report.discovered
    );
    ExitCode::SUCCESS
}
