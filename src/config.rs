//! Configuration for textcrawl

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::frontier::DEFAULT_MAX_PENDING;
use crate::writer::DEFAULT_MAX_FILE_BYTES;

/// Main configuration for a crawl run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Crawl loop and frontier configuration
    #[serde(default)]
    pub crawl: CrawlConfig,
    /// HTTP fetch configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Output file configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects every validation error and reports them together so the user
    /// can fix the file in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.crawl.max_pending == 0 {
            errors.push("crawl.max_pending must be positive".to_string());
        }

        if self.fetch.timeout_secs == 0 {
            errors.push("fetch.timeout_secs must be positive".to_string());
        }
        if self.fetch.user_agent.is_empty() {
            errors.push("fetch.user_agent must not be empty".to_string());
        }

        if self.output.max_file_bytes == 0 {
            errors.push("output.max_file_bytes must be positive".to_string());
        }
        if self.output.dir.as_os_str().is_empty() {
            errors.push("output.dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}

/// Crawl loop and frontier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Frontier pending cap; whole discovery batches are dropped above it
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
    /// Word threshold for a text node to count as a content block
    #[serde(default = "default_min_block_words")]
    pub min_block_words: usize,
    /// Word threshold for a collected block to be saved
    #[serde(default = "default_min_save_words")]
    pub min_save_words: usize,
}

fn default_max_pending() -> usize {
    DEFAULT_MAX_PENDING
}

fn default_min_block_words() -> usize {
    20
}

fn default_min_save_words() -> usize {
    10
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pending: default_max_pending(),
            min_block_words: default_min_block_words(),
            min_save_words: default_min_save_words(),
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection timeout (seconds)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Maximum redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_user_agent() -> String {
    // Browser-like UA; some sites refuse obvious bots outright.
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/58.0.3029.110 Safari/537"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the numbered output files are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Size threshold at which the active file is rotated
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("corpus")
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}
