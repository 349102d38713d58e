//! Crawl loop orchestration
//!
//! `Crawler` owns every piece of crawl state (frontier, extractor, cleaner,
//! checksum set, rolling writer, counters) so that independent sessions can
//! run side by side and tests can drive the loop directly. One URL flows
//! through per iteration: take from the frontier, fetch, discover links,
//! extract, clean, dedup, append; the URL is marked visited whether or not
//! the fetch succeeded.

use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::cleaner::TextCleaner;
use crate::config::Config;
use crate::dedup::ContentDeduplicator;
use crate::extractor::{ContentExtractor, ExtractorConfig};
use crate::fetcher::{extract_links, Fetch};
use crate::frontier::Frontier;
use crate::util::truncate_str;
use crate::writer::RollingWriter;

/// Counters accumulated over a crawl run. Diagnostic only.
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// URLs fetched successfully
    pub pages_fetched: u64,
    /// URLs whose fetch failed (network, status, content type)
    pub fetch_failures: u64,
    /// Cleaned blocks written to the output files
    pub texts_saved: u64,
    /// Cleaned blocks discarded because their checksum was already recorded
    pub duplicates_skipped: u64,
    /// Link candidates seen across all fetched pages
    pub links_discovered: u64,
    /// Link candidates actually admitted to the frontier
    pub links_queued: u64,
}

/// A single crawl session, generic over the fetch collaborator.
pub struct Crawler<F> {
    fetcher: F,
    frontier: Frontier,
    extractor: ContentExtractor,
    cleaner: TextCleaner,
    dedup: ContentDeduplicator,
    writer: RollingWriter,
    min_save_words: usize,
    stats: CrawlStats,
}

impl<F: Fetch> Crawler<F> {
    /// Build a session from the configuration.
    ///
    /// Creates the output directory; failure to do so aborts the run here,
    /// before any fetch.
    pub fn new(config: &Config, fetcher: F) -> anyhow::Result<Self> {
        let writer = RollingWriter::create(&config.output.dir, config.output.max_file_bytes)?;
        let cleaner = TextCleaner::new()?;
        let extractor = ContentExtractor::new(ExtractorConfig {
            min_block_words: config.crawl.min_block_words,
        });

        Ok(Self {
            fetcher,
            frontier: Frontier::new(config.crawl.max_pending),
            extractor,
            cleaner,
            dedup: ContentDeduplicator::new(),
            writer,
            min_save_words: config.crawl.min_save_words,
            stats: CrawlStats::default(),
        })
    }

    /// Queue the crawl's starting URL.
    pub fn seed(&mut self, url: impl Into<String>) {
        self.frontier.seed(url);
    }

    /// Run until the frontier is exhausted.
    pub async fn run(&mut self) {
        while let Some(url) = self.frontier.take_next() {
            // A visited URL can only come back out of the frontier if
            // something re-queued it; skip without fetching.
            if self.frontier.is_visited(&url) {
                debug!("Skipping already visited {}", url);
                self.frontier.mark_visited(url);
                continue;
            }

            match self.fetcher.fetch(&url).await {
                Ok(body) => {
                    self.stats.pages_fetched += 1;
                    self.process_page(&url, &body);
                }
                Err(e) => {
                    // Failed fetches are terminal for the URL; no retry.
                    self.stats.fetch_failures += 1;
                    debug!("Fetch failed for {}: {}", url, e);
                }
            }

            self.frontier.mark_visited(url);
        }

        info!(
            "Frontier exhausted after {} pages ({} failures)",
            self.stats.pages_fetched, self.stats.fetch_failures
        );
    }

    /// Handle one successfully fetched page: feed discovered links back into
    /// the frontier, then extract, clean, dedup, and persist its text.
    fn process_page(&mut self, url: &str, body: &str) {
        if let Ok(base) = Url::parse(url) {
            let links = extract_links(body, &base);
            self.stats.links_discovered += links.len() as u64;
            let queued = self.frontier.offer(links);
            self.stats.links_queued += queued as u64;
        }

        let document = Html::parse_document(body);
        let text = self.collect_text(&document);
        if text.is_empty() {
            return;
        }

        let cleaned = self.cleaner.clean(&text);
        if cleaned.is_empty() {
            return;
        }
        if !self.dedup.should_persist(&cleaned) {
            self.stats.duplicates_skipped += 1;
            debug!("Duplicate content at {}", truncate_str(url, 80));
            return;
        }

        match self.writer.append(&cleaned) {
            Ok(path) => {
                self.stats.texts_saved += 1;
                info!(
                    "Saved {} | queue {} | saved {} | {} bytes in {}",
                    truncate_str(url, 60),
                    self.frontier.pending_len(),
                    self.stats.texts_saved,
                    self.writer.bytes_written(),
                    path.display()
                );
            }
            Err(e) => {
                // Dropped write; in-memory crawl state is unaffected.
                warn!(
                    "Failed to append to {}: {}",
                    self.writer.active_path().display(),
                    e
                );
            }
        }
    }

    /// The save policy: concatenate every multi-extraction block above the
    /// save threshold, falling back to the single main block only when the
    /// multi extraction found nothing at all.
    fn collect_text(&self, document: &Html) -> String {
        let blocks = self.extractor.extract_multiple(document);

        let mut text = String::new();
        for block in &blocks {
            if !block.is_empty() && block.split_whitespace().count() > self.min_save_words {
                text.push_str(block);
            }
        }
        if blocks.is_empty() {
            text.push_str(&self.extractor.extract_main(document));
        }

        text
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// The session's frontier state.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Total bytes appended to the output files.
    pub fn output_bytes(&self) -> u64 {
        self.writer.bytes_written()
    }

    /// Number of output files written.
    pub fn output_files(&self) -> usize {
        self.writer.files_written()
    }
}
