//! Run configuration.
//!
//! Loaded once from a JSON file at startup and passed by reference into
//! everything that needs it — no ambient globals. The JSON keys match the
//! layout existing `config.json` files already use.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Where a track's (title, artists) identity comes from.
///
/// Picked once per run; the two strategies are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NameOrigin {
    /// Embedded ID3 title/artist tags.
    #[serde(rename = "METADATA")]
    Metadata,

    /// The `"<artists> - <title>.<ext>"` file name convention.
    #[serde(rename = "FILE_NAME")]
    FileName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the music collection. Required, non-empty.
    #[serde(rename = "music_path_directory")]
    pub musics_dir: PathBuf,

    #[serde(rename = "music_name_origin")]
    pub name_origin: NameOrigin,

    /// Materialize `Artists/<name>/` hard-link views after renaming.
    #[serde(rename = "save_music_per_artist", default)]
    pub save_per_artist: bool,

    /// Materialize `Genre/<tag>/` copy views after renaming.
    #[serde(rename = "save_music_per_genre", default)]
    pub save_per_genre: bool,

    /// Print the ranked popularity table once the run finishes.
    #[serde(rename = "print_artist_popularity", default)]
    pub print_popularity: bool,

    /// Report skipped files (bad names, missing tags) as warnings.
    #[serde(rename = "print_error_logs", default)]
    pub print_error_logs: bool,

    /// Truncate metadata titles containing `/` at the first `/`, then at
    /// the first `-`. Inherited cleanup heuristic for malformed tags.
    #[serde(default = "default_true")]
    pub title_cleanup: bool,

    /// Extra popularity point when a title mentions the artist by name.
    #[serde(default = "default_true")]
    pub title_mention_bonus: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.musics_dir.as_os_str().is_empty() {
            return Err(Error::Config("music_path_directory is empty".into()));
        }
        Ok(())
    }
}
