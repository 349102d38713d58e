//! Content extraction heuristics over a parsed HTML document
//!
//! Two strategies walk the document tree depth-first:
//! - `extract_main` returns the single largest text node, for pages where
//!   the content lives in one block.
//! - `extract_multiple` collects every sufficiently large text node outside
//!   boilerplate containers (header, footer, nav, aside).
//!
//! A text node's size is the number of space characters plus one, so even a
//! whitespace-only node scores at least 1. The metric is deliberate: it is
//! what the crawl's dedup and save thresholds were tuned against.

use ego_tree::NodeRef;
use scraper::{Html, Node};
use std::collections::HashSet;

/// Elements whose text is invisible to both strategies.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Additional containers excluded from multi-block extraction.
const BOILERPLATE_ELEMENTS: &[&str] = &["header", "footer", "nav", "aside"];

/// Configuration for multi-block extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// A text node must exceed this many words to be collected as a block
    pub min_block_words: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { min_block_words: 20 }
    }
}

/// Extracts readable text blocks from parsed documents.
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl ContentExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Return the raw text of the largest text node in the document, or an
    /// empty string if the document has none.
    ///
    /// Replacement requires a strictly greater size, so the first of several
    /// equally sized nodes wins.
    pub fn extract_main(&self, document: &Html) -> String {
        let mut best = String::new();
        let mut best_size = 0;
        Self::visit_main(document.tree.root(), &mut best, &mut best_size);
        best
    }

    fn visit_main(node: NodeRef<Node>, best: &mut String, best_size: &mut usize) {
        for child in node.children() {
            match child.value() {
                Node::Text(text) => {
                    let size = word_size(text);
                    if size > *best_size {
                        *best_size = size;
                        *best = text.to_string();
                    }
                }
                Node::Element(element) => {
                    if !SKIPPED_ELEMENTS.contains(&element.name()) {
                        Self::visit_main(child, best, best_size);
                    }
                }
                _ => {}
            }
        }
    }

    /// Collect every text node larger than the configured threshold, in
    /// traversal order, skipping boilerplate containers at any depth.
    ///
    /// The result is deduplicated by exact string equality with the first
    /// occurrence kept.
    pub fn extract_multiple(&self, document: &Html) -> Vec<String> {
        let mut blocks = Vec::new();
        self.visit_blocks(document.tree.root(), &mut blocks);

        let mut seen = HashSet::new();
        blocks.retain(|block: &String| seen.insert(block.clone()));
        blocks
    }

    fn visit_blocks(&self, node: NodeRef<Node>, blocks: &mut Vec<String>) {
        for child in node.children() {
            match child.value() {
                Node::Text(text) => {
                    if word_size(text) > self.config.min_block_words {
                        blocks.push(text.to_string());
                    }
                }
                Node::Element(element) => {
                    let name = element.name();
                    if !SKIPPED_ELEMENTS.contains(&name) && !BOILERPLATE_ELEMENTS.contains(&name) {
                        self.visit_blocks(child, blocks);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Size of a text node: count of space characters plus one. Never zero.
fn word_size(text: &str) -> usize {
    text.bytes().filter(|&b| b == b' ').count() + 1
}
