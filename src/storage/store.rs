use super::tokenizer::{Tokenizer, corrupted};
use crate::error::{Result, WellnusError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File holding the atomic habit list.
pub const HABIT_FILE: &str = "habits.txt";

const QUARANTINE_EXTENSION: &str = "corrupt";

/// One text file per record type inside a data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Non-blank lines of `file`. A missing file reads as empty.
    pub fn load_lines(&self, file: &str) -> Result<Vec<String>> {
        let path = self.path_for(file);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No saved data yet");
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            corrupted(format!(
                "{} is not valid UTF-8 (byte {})",
                path.display(),
                e.utf8_error().valid_up_to()
            ))
        })?;
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replace `file` with `lines`, one per line.
    pub fn save_lines(&self, file: &str, lines: &[String]) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        let path = self.path_for(file);
        self.write_atomic(&path, &content)?;
        tracing::info!(path = %path.display(), records = lines.len(), "Saved data");
        Ok(())
    }

    pub fn load<T>(&self, file: &str, tokenizer: &impl Tokenizer<T>) -> Result<Vec<T>> {
        let lines = self.load_lines(file)?;
        tokenizer.detokenize(&lines)
    }

    pub fn save<T>(&self, file: &str, records: &[T], tokenizer: &impl Tokenizer<T>) -> Result<()> {
        self.save_lines(file, &tokenizer.tokenize(records))
    }

    /// Move `file` aside so it is not overwritten by the next save.
    ///
    /// Earlier quarantined copies are kept: the first goes to `<file>.corrupt`,
    /// later ones to `<file>.corrupt.1`, `<file>.corrupt.2` and so on. Returns
    /// where it went.
    pub fn quarantine(&self, file: &str) -> Result<PathBuf> {
        let path = self.path_for(file);
        let target = self.free_quarantine_path(file);
        std::fs::rename(&path, &target).map_err(|e| {
            WellnusError::Storage(format!(
                "Failed to move {} aside: {}",
                path.display(),
                e
            ))
        })?;
        tracing::warn!(
            from = %path.display(),
            to = %target.display(),
            "Quarantined unreadable data file"
        );
        Ok(target)
    }

    fn free_quarantine_path(&self, file: &str) -> PathBuf {
        let base = format!("{}.{}", file, QUARANTINE_EXTENSION);
        let first = self.path_for(&base);
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| self.path_for(&format!("{}.{}", base, n)))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }

    /// Write via a temp file in the same directory and rename over the target.
    fn write_atomic(&self, target_path: &Path, content: &str) -> Result<()> {
        let target_dir = target_path.parent().unwrap_or_else(|| Path::new("."));

        let mut temp_file = NamedTempFile::new_in(target_dir)
            .map_err(|e| WellnusError::Storage(format!("Failed to create temp file: {}", e)))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| WellnusError::Storage(format!("Failed to write to temp file: {}", e)))?;

        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| WellnusError::Storage(format!("Failed to sync temp file: {}", e)))?;

        temp_file
            .persist(target_path)
            .map_err(|e| WellnusError::Storage(format!("Failed to persist temp file: {}", e)))?;

        Ok(())
    }
}
