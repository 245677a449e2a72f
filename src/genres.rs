//! Static artist → genre lookup table.
//!
//! Loaded once from JSON at startup and immutable for the run. Lookups are
//! exact, case-sensitive name matches.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Sentinel tag for artists the table knows nothing about.
pub const UNKNOWN_GENRE: &str = "UNKNOWN";

/// One table row. The same artist may appear in several rows; lookups
/// union every match in table order.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreEntry {
    pub artist: String,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GenreTable {
    entries: Vec<GenreEntry>,
}

impl GenreTable {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<GenreEntry> = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if entries.is_empty() {
            return Err(Error::EmptyGenreTable(path.to_path_buf()));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<GenreEntry>) -> Self {
        Self { entries }
    }

    /// All genre tags for every entry matching any of `artists`, in table
    /// order, concatenated without dedup. No match at all yields the
    /// `UNKNOWN` sentinel alone.
    pub fn for_artists<S: AsRef<str>>(&self, artists: &[S]) -> Vec<String> {
        let mut found = Vec::new();
        for entry in &self.entries {
            for artist in artists {
                if entry.artist == artist.as_ref() {
                    found.extend(entry.genres.iter().cloned());
                }
            }
        }
        if found.is_empty() {
            return vec![UNKNOWN_GENRE.to_string()];
        }
        found
    }
}
