//! Error taxonomy for a classification run.
//!
//! Everything here is fatal: it bubbles unchanged to `main` and aborts the
//! run. Recoverable conditions (bad file names, missing tags) never become
//! an `Error`; they are `identity::SkipReason`s instead.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem operation failed (walk, rename, link, copy, mkdir).
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A JSON input (configuration or genre table) failed to decode.
    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// ID3 tag could not be read (a missing tag is NOT this; see tags::read).
    #[error("reading tags from {path:?}: {source}")]
    TagRead { path: PathBuf, source: id3::Error },

    /// ID3 tag could not be written back.
    #[error("writing tags to {path:?}: {source}")]
    TagWrite { path: PathBuf, source: id3::Error },

    /// Canonical rename would clobber an unrelated file.
    #[error("cannot rename {from:?}: destination {to:?} already exists")]
    DestinationOccupied { from: PathBuf, to: PathBuf },

    /// The library walk found no music files at all.
    #[error("no music files found under {0:?}")]
    EmptyLibrary(PathBuf),

    /// Every file in the library was skipped.
    #[error("no tracks could be resolved from the library")]
    EmptyResolve,

    /// The genre lookup table decoded to zero entries.
    #[error("genre table {0:?} is empty")]
    EmptyGenreTable(PathBuf),
}
