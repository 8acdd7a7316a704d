//! # Storage Layer
//!
//! This module defines the storage abstraction for moviedex. The [`MovieStore`]
//! trait lets the command layer work against any backend without knowing how
//! the collection is laid out on disk.
//!
//! ## Implementations
//!
//! - [`json::JsonStore`]: one JSON object keyed by title.
//! - [`csv::CsvStore`]: a header row plus one row per movie.
//! - [`memory::InMemoryStore`]: no persistence, for testing command logic.
//!
//! Exactly one backend is picked at startup and used for the whole session.
//!
//! ## Snapshot Semantics
//!
//! There is no cache. Every call re-reads the backing file, and every
//! mutation rewrites it in full (read, modify, write). Callers hold a
//! [`Collection`] only for the duration of one operation.
//!
//! ## Uniqueness
//!
//! Titles are the key. Both file backends reject `add_movie` for a title that
//! already exists with [`MovieError::DuplicateTitle`]; the add command checks
//! first so users see a friendly message instead.
//!
//! ## Missing Files
//!
//! `list_movies` on a missing file creates an empty one (`{}` for JSON, the
//! header row for CSV) and returns an empty collection. A file that exists but
//! cannot be read or parsed is reported as [`MovieError::StorageUnavailable`].

use crate::error::{MovieError, Result};
use crate::fetch::MetadataSource;
use crate::model::{Collection, MovieInfo};
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub mod csv;
pub mod json;
pub mod memory;

/// Abstract interface for movie storage.
pub trait MovieStore {
    /// Read the full collection, creating an empty data file if none exists.
    fn list_movies(&self) -> Result<Collection>;

    /// Append a movie with empty notes.
    fn add_movie(&mut self, info: &MovieInfo) -> Result<()>;

    /// Remove the movie with exactly this title.
    fn delete_movie(&mut self, title: &str) -> Result<()>;

    /// Replace the notes of the movie with exactly this title.
    fn update_movie(&mut self, title: &str, notes: &str) -> Result<()>;

    /// The data file this store owns.
    fn file_path(&self) -> &Path;

    /// The metadata source this store resolves new titles with.
    fn source(&self) -> &dyn MetadataSource;

    /// Resolve canonical movie info for a user-entered title.
    fn fetch_external_info(&self, title: &str) -> Result<MovieInfo> {
        match self.source().lookup(title) {
            Some(info) => {
                tracing::debug!("lookup {:?} resolved to {:?}", title, info.title);
                Ok(info)
            }
            None => Err(MovieError::MetadataNotFound(title.to_string())),
        }
    }
}

/// Reads a data file, mapping any failure to `StorageUnavailable`.
pub(crate) fn read_data_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MovieError::StorageUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Replaces `path` with `content` via a temp file in the same directory.
pub(crate) fn write_data_file(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(MovieError::Io)?;
    }

    let tmp_file = dir.join(format!(".moviedex-{}.tmp", Uuid::new_v4()));
    if let Err(e) = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, path)) {
        let _ = fs::remove_file(&tmp_file);
        return Err(MovieError::Io(e));
    }
    tracing::debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn leftover_tmp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.extension().map(|e| e == "tmp").unwrap_or(false))
            .collect()
    }

    #[test]
    fn write_replaces_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        fs::write(&path, "old").unwrap();

        write_data_file(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(leftover_tmp_files(dir.path()).is_empty());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory in the way makes the rename fail.
        let path = dir.path().join("movies.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_data_file(&path, b"{}").unwrap_err();

        assert!(matches!(err, MovieError::Io(_)));
        assert!(leftover_tmp_files(dir.path()).is_empty());
        assert!(path.join("keep").is_file());
    }
}
