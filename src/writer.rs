//! Rolling output files for persisted text
//!
//! Extracted blocks are appended, one per line, to numbered files in the
//! output directory (`0.txt`, `1.txt`, ...). Exactly one file is active at a
//! time. The size check runs after each write, so the file that crosses the
//! threshold keeps the bytes that pushed it over and the next append opens a
//! fresh file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rotation threshold: 1 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1_048_576;

/// Appends text blocks to size-bounded numbered files.
#[derive(Debug)]
pub struct RollingWriter {
    dir: PathBuf,
    index: usize,
    max_file_bytes: u64,
    bytes_written: u64,
    files_written: usize,
}

impl RollingWriter {
    /// Create a writer rooted at `dir`, creating the directory if needed.
    ///
    /// Failure here is the one fatal error of a crawl run; it happens before
    /// any fetch.
    pub fn create(dir: impl Into<PathBuf>, max_file_bytes: u64) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            index: 0,
            max_file_bytes,
            bytes_written: 0,
            files_written: 0,
        })
    }

    /// Append `text` plus a trailing newline to the active file, then advance
    /// the active index if the file has reached the size threshold.
    ///
    /// Returns the path that was written to.
    pub fn append(&mut self, text: &str) -> io::Result<PathBuf> {
        let path = self.active_path();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;

        self.bytes_written += text.len() as u64 + 1;
        if self.index >= self.files_written {
            self.files_written = self.index + 1;
        }

        let size = file.metadata()?.len();
        if size >= self.max_file_bytes {
            self.index += 1;
        }

        Ok(path)
    }

    /// Path of the file the next append will target.
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.txt", self.index))
    }

    /// Index of the file the next append will target.
    pub fn active_index(&self) -> usize {
        self.index
    }

    /// Total bytes appended over the writer's lifetime.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Number of distinct files that have received at least one append.
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_writes_one_line_per_block() {
        let tmp = TempDir::new().unwrap();
        let mut writer = RollingWriter::create(tmp.path(), DEFAULT_MAX_FILE_BYTES).unwrap();

        writer.append("first block").unwrap();
        writer.append("second block").unwrap();

        let content = fs::read_to_string(tmp.path().join("0.txt")).unwrap();
        assert_eq!(content, "first block\nsecond block\n");
        assert_eq!(writer.files_written(), 1);
    }

    #[test]
    fn create_makes_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("out").join("corpus");
        RollingWriter::create(&nested, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn rotation_happens_after_the_crossing_write() {
        let tmp = TempDir::new().unwrap();
        let mut writer = RollingWriter::create(tmp.path(), 32).unwrap();

        // 20 bytes + newline: under the threshold, no rotation yet.
        let path = writer.append(&"a".repeat(20)).unwrap();
        assert_eq!(path, tmp.path().join("0.txt"));
        assert_eq!(writer.active_index(), 0);

        // This append pushes 0.txt past 32 bytes. The bytes still land in
        // 0.txt; only the *next* append moves to 1.txt.
        let path = writer.append(&"b".repeat(20)).unwrap();
        assert_eq!(path, tmp.path().join("0.txt"));
        assert_eq!(writer.active_index(), 1);

        let path = writer.append("c").unwrap();
        assert_eq!(path, tmp.path().join("1.txt"));

        // The crossed file is never appended to again.
        let first = fs::read_to_string(tmp.path().join("0.txt")).unwrap();
        assert!(!first.contains('c'));
        assert_eq!(writer.files_written(), 2);
    }

    #[test]
    fn write_exactly_at_threshold_rotates() {
        let tmp = TempDir::new().unwrap();
        let mut writer = RollingWriter::create(tmp.path(), 8).unwrap();

        // 7 bytes + newline == 8: at the threshold counts as crossed.
        writer.append("1234567").unwrap();
        assert_eq!(writer.active_index(), 1);
    }

    #[test]
    fn bytes_written_accumulates_across_files() {
        let tmp = TempDir::new().unwrap();
        let mut writer = RollingWriter::create(tmp.path(), 8).unwrap();

        writer.append("1234567").unwrap();
        writer.append("abc").unwrap();
        assert_eq!(writer.bytes_written(), 12);
        assert_eq!(writer.files_written(), 2);
    }
}
