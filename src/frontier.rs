//! Crawl frontier: the ordered, deduplicated queue of URLs to visit
//!
//! The frontier keeps two disjoint sets: `pending` (discovered but not yet
//! fetched) and `visited` (fetched or attempted, successfully or not). URLs
//! are compared as exact strings; no normalization happens here.
//!
//! Selection is not FIFO: `take_next` always removes the lexicographically
//! greatest pending URL, so the crawl order depends on link content rather
//! than discovery order. The sorted-set-with-remove-maximum shape is
//! deliberate and must not be swapped for a plain queue.

use std::collections::{BTreeSet, HashSet};

/// Default cap on the pending set before new discoveries are dropped.
pub const DEFAULT_MAX_PENDING: usize = 100;

/// Deduplicated, order-biased URL queue with a bounded pending set.
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched, kept in lexicographic order
    pending: BTreeSet<String>,
    /// URLs that have been fetched or attempted
    visited: HashSet<String>,
    /// Once `pending` grows past this, whole discovery batches are dropped
    max_pending: usize,
}

impl Frontier {
    /// Create an empty frontier with the given pending cap.
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: BTreeSet::new(),
            visited: HashSet::new(),
            max_pending,
        }
    }

    /// Insert the crawl's starting URL. Unconditional; used once at startup.
    pub fn seed(&mut self, url: impl Into<String>) {
        self.pending.insert(url.into());
    }

    /// Offer a batch of discovered URLs.
    ///
    /// If `pending` already exceeds the cap the entire batch is dropped, not
    /// trimmed to fit. Otherwise every candidate that is neither visited nor
    /// already pending is inserted. Returns the number newly inserted.
    pub fn offer<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        if self.pending.len() > self.max_pending {
            return 0;
        }

        let mut added = 0;
        for url in urls {
            if self.visited.contains(&url) {
                continue;
            }
            if self.pending.insert(url) {
                added += 1;
            }
        }
        added
    }

    /// Remove and return the lexicographically greatest pending URL.
    ///
    /// Returns `None` when the frontier is exhausted.
    pub fn take_next(&mut self) -> Option<String> {
        self.pending.pop_last()
    }

    /// Record that a URL has been fetched or attempted. Idempotent.
    pub fn mark_visited(&mut self, url: impl Into<String>) {
        self.visited.insert(url.into());
    }

    /// Whether a URL has already been processed.
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting to be fetched.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of URLs already processed.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn take_next_pops_lexicographic_maximum() {
        let mut frontier = Frontier::default();
        frontier.offer(urls(&[
            "https://example.com/a",
            "https://example.com/c",
            "https://example.com/b",
        ]));

        assert_eq!(frontier.take_next().as_deref(), Some("https://example.com/c"));
        assert_eq!(frontier.take_next().as_deref(), Some("https://example.com/b"));
        assert_eq!(frontier.take_next().as_deref(), Some("https://example.com/a"));
        assert_eq!(frontier.take_next(), None);
    }

    #[test]
    fn taken_url_is_removed_from_pending() {
        let mut frontier = Frontier::default();
        frontier.seed("https://example.com/page");

        assert_eq!(frontier.pending_len(), 1);
        frontier.take_next().expect("seeded url");
        assert_eq!(frontier.pending_len(), 0);
    }

    #[test]
    fn offer_skips_visited_urls() {
        let mut frontier = Frontier::default();
        frontier.mark_visited("https://example.com/seen");

        let added = frontier.offer(urls(&[
            "https://example.com/seen",
            "https://example.com/new1",
            "https://example.com/new2",
        ]));

        assert_eq!(added, 2);
        assert_eq!(frontier.pending_len(), 2);
    }

    #[test]
    fn offer_ignores_duplicates_already_pending() {
        let mut frontier = Frontier::default();
        assert_eq!(frontier.offer(urls(&["https://example.com/page"])), 1);
        assert_eq!(frontier.offer(urls(&["https://example.com/page"])), 0);
        assert_eq!(frontier.pending_len(), 1);
    }

    #[test]
    fn offer_drops_whole_batch_when_over_cap() {
        let mut frontier = Frontier::new(3);
        frontier.offer((0..4).map(|i| format!("https://example.com/{}", i)));
        assert_eq!(frontier.pending_len(), 4);

        // pending (4) now exceeds the cap (3): the next batch is skipped
        // entirely, including URLs that would otherwise be admitted.
        let added = frontier.offer(urls(&["https://example.com/z"]));
        assert_eq!(added, 0);
        assert_eq!(frontier.pending_len(), 4);
    }

    #[test]
    fn offer_at_exactly_cap_still_admits() {
        let mut frontier = Frontier::new(3);
        frontier.offer((0..3).map(|i| format!("https://example.com/{}", i)));
        assert_eq!(frontier.pending_len(), 3);

        // The batch skip triggers only when pending strictly exceeds the cap.
        let added = frontier.offer(urls(&["https://example.com/z"]));
        assert_eq!(added, 1);
    }

    #[test]
    fn mark_visited_is_idempotent() {
        let mut frontier = Frontier::default();
        frontier.mark_visited("https://example.com/page");
        frontier.mark_visited("https://example.com/page");
        assert_eq!(frontier.visited_len(), 1);
    }

    #[test]
    fn visited_url_never_reenters_pending() {
        let mut frontier = Frontier::default();
        frontier.seed("https://example.com/page");
        let url = frontier.take_next().expect("seeded url");
        frontier.mark_visited(url.clone());

        frontier.offer(vec![url.clone()]);
        assert_eq!(frontier.pending_len(), 0);
        assert!(frontier.is_visited(&url));
    }
}
