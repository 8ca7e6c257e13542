//! Flat-file song list storage
//!
//! One title per line, UTF-8, trailing newline after the last entry. Every
//! save rewrites the whole file: the list is written to `<file>.tmp` next to
//! the target and then renamed over it, so a failed write never leaves a
//! truncated list behind.

use crate::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and rewrites the persisted song list
#[derive(Debug, Clone)]
pub struct SongStore {
    path: PathBuf,
}

impl SongStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all non-blank lines, trimmed, in file order
    ///
    /// A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Song list {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::storage(&self.path, e)),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Replace the stored list with `titles`
    pub fn save<'a, I>(&self, titles: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut content = String::new();
        for title in titles {
            content.push_str(title);
            content.push('\n');
        }

        self.write_atomic(content.as_bytes())
            .map_err(|e| Error::storage(&self.path, e))
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let result = (|| {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
