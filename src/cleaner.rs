//! Markup cleaning applied to extracted text before checksum and persistence

use regex::Regex;

/// Strips residual markup and normalizes whitespace in extracted text.
///
/// The regexes are compiled once at construction and reused for every page.
#[derive(Debug)]
pub struct TextCleaner {
    tag: Regex,
    spaces: Regex,
    newline: Regex,
    multi_newline: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            tag: Regex::new(r"<[^>]+>")?,
            spaces: Regex::new(r"[ \t]+")?,
            newline: Regex::new(r"[ \t]*\n[ \t]*")?,
            multi_newline: Regex::new(r"\n+")?,
        })
    }

    /// Remove every `<...>` tag run from the text.
    pub fn strip_tags(&self, text: &str) -> String {
        self.tag.replace_all(text, "").into_owned()
    }

    /// Collapse horizontal whitespace runs to a single space, strip
    /// whitespace around newlines, trim, and collapse blank lines.
    pub fn normalize_whitespace(&self, text: &str) -> String {
        let out = self.spaces.replace_all(text, " ");
        let out = self.newline.replace_all(&out, "\n");
        let out = out.trim();
        self.multi_newline.replace_all(out, "\n").into_owned()
    }

    /// The full cleaning pipeline: strip tags, then normalize whitespace.
    pub fn clean(&self, text: &str) -> String {
        self.normalize_whitespace(&self.strip_tags(text))
    }
}
