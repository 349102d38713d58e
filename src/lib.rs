//! textcrawl: a single-process web crawler that harvests page text
//!
//! Starting from one seed URL, the crawler walks discovered links, extracts
//! the readable text of each page, deduplicates it by checksum, and appends
//! it to size-bounded numbered files:
//! - Frontier: ordered, deduplicated URL queue with a bounded pending set
//! - Extractor: largest-block and multi-block heuristics over the DOM
//! - Cleaner: tag stripping and whitespace normalization
//! - Deduplicator: CRC-32 fingerprints of persisted content
//! - Writer: rolling numbered output files with a 1 MiB threshold

pub mod cleaner;
pub mod config;
pub mod crawler;
pub mod dedup;
pub mod extractor;
pub mod fetcher;
pub mod frontier;
pub mod util;
pub mod writer;

pub use cleaner::TextCleaner;
pub use config::Config;
pub use crawler::{CrawlStats, Crawler};
pub use dedup::ContentDeduplicator;
pub use extractor::{ContentExtractor, ExtractorConfig};
pub use fetcher::{extract_links, Fetch, FetchError, HttpFetcher};
pub use frontier::Frontier;
pub use writer::RollingWriter;
