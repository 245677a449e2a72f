//! Core data type shared across the pipeline.
//!
//! Rule of thumb:
//! - boring bag of data
//! - no filesystem code
//! - no tag parsing code
//!
//! A `Track` is built by identity extraction, completed by the naming pass,
//! and discarded once placement is done.

use std::path::PathBuf;

/// One audio file moving through the classification pipeline.
#[derive(Debug, Clone)]
pub struct Track {
    /// Resolved song title. Never empty past identity extraction.
    pub title: String,

    /// Artist credits as originally parsed, in source order. Duplicates are
    /// possible when the source data is inconsistent; they are kept.
    pub artists: Vec<String>,

    /// Genre tags resolved from the lookup table.
    pub genres: Vec<String>,

    /// Directory the file lived in when it was discovered.
    pub source_dir: PathBuf,

    /// Current location on disk. Updated when the file is renamed.
    pub path: PathBuf,

    /// File extension carried over from the source path (e.g. "mp3").
    pub extension: String,

    /// Popularity-ranked, comma-joined artist credit. Empty until the
    /// naming pass runs over the complete popularity snapshot.
    pub canonical_artists: String,
}

impl Track {
    /// File name used for the renamed original and for every placed view.
    pub fn canonical_file_name(&self) -> String {
        format!(
            "{} - {}.{}",
            self.canonical_artists, self.title, self.extension
        )
    }
}
