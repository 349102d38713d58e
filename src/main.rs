//! textcrawl: crawl the web from a seed URL and harvest deduplicated text

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use textcrawl::{Config, Crawler, HttpFetcher};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "textcrawl")]
#[command(about = "Crawl from a seed URL and harvest deduplicated page text into rolling files")]
#[command(version)]
struct Cli {
    /// Seed URL to start crawling from
    url: String,

    /// Output directory for the numbered text files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "textcrawl.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load or create config; CLI flags override the file
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    if let Some(output) = cli.output {
        config.output.dir = output;
    }
    config.validate()?;

    info!("Starting crawl from {}", cli.url);
    info!("Output directory: {}", config.output.dir.display());

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let mut crawler = Crawler::new(&config, fetcher)?;
    crawler.seed(&cli.url);
    crawler.run().await;

    let stats = crawler.stats();
    println!("\nCrawl complete!");
    println!("==================");
    println!("Pages fetched:      {}", stats.pages_fetched);
    println!("Fetch failures:     {}", stats.fetch_failures);
    println!("Blocks saved:       {}", stats.texts_saved);
    println!("Duplicates skipped: {}", stats.duplicates_skipped);
    println!("Links discovered:   {}", stats.links_discovered);
    println!("Links queued:       {}", stats.links_queued);
    println!("Output files:       {}", crawler.output_files());
    println!("Output bytes:       {}", crawler.output_bytes());

    Ok(())
}
