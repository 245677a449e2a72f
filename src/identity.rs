//! Identity resolution: turn one file path into a (title, artists) identity.
//!
//! Two strategies, chosen once at startup and never mixed within a run:
//! - [`MetadataResolver`] trusts embedded ID3 title/artist tags.
//! - [`FilenameResolver`] parses `"<artists> - <title>.<ext>"` base names.
//!
//! A resolver distinguishes three outcomes: a usable track, a skip with a
//! reason, or a fatal error. Skips never abort the run; fatal errors
//! always do.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path};

use crate::config::{Config, NameOrigin};
use crate::error::Result;
use crate::placement::{ARTISTS_DIR, GENRE_DIR};
use crate::tags;
use crate::track::Track;

/// Outcome of resolving one file.
pub enum Resolved {
    Track(Track),
    Skipped(SkipReason),
}

/// Why a file was left alone. Recoverable by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already lives under a generated `Artists/` or `Genre/` tree.
    GeneratedOutput,
    /// Metadata origin: absent or empty title/artist tags.
    MissingTags,
    /// Filename origin: base name does not split into `"<artists> - <title>"`.
    UnparsableName,
    /// Parsed, but the title or every artist name came out empty.
    EmptyIdentity,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::GeneratedOutput => "already classified output",
            SkipReason::MissingTags => "missing title or artist tag",
            SkipReason::UnparsableName => "invalid file name",
            SkipReason::EmptyIdentity => "empty title or artist list",
        })
    }
}

pub trait IdentityResolver {
    fn resolve(&self, path: &Path) -> Result<Resolved>;
}

/// Pick the strategy for this run from the configuration.
pub fn for_origin(config: &Config) -> Box<dyn IdentityResolver> {
    match config.name_origin {
        NameOrigin::Metadata => Box::new(MetadataResolver {
            title_cleanup: config.title_cleanup,
        }),
        NameOrigin::FileName => Box::new(FilenameResolver),
    }
}

/// Identity from embedded ID3 title/artist tags.
pub struct MetadataResolver {
    pub title_cleanup: bool,
}

impl IdentityResolver for MetadataResolver {
    fn resolve(&self, path: &Path) -> Result<Resolved> {
        if in_generated_tree(path) {
            return Ok(Resolved::Skipped(SkipReason::GeneratedOutput));
        }

        let tags = tags::read_song_tags(path)?;
        let (Some(title), Some(artist)) = (non_empty(tags.title), non_empty(tags.artist)) else {
            return Ok(Resolved::Skipped(SkipReason::MissingTags));
        };

        // Multi-artist tags are a single `/`-joined string.
        let artists: Vec<String> = artist
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        let title = if self.title_cleanup {
            clean_title(&title)
        } else {
            title
        };

        build_track(path, title, artists)
    }
}

/// Identity from the `"<artists> - <title>.<ext>"` file name convention.
pub struct FilenameResolver;

impl IdentityResolver for FilenameResolver {
    fn resolve(&self, path: &Path) -> Result<Resolved> {
        if in_generated_tree(path) {
            return Ok(Resolved::Skipped(SkipReason::GeneratedOutput));
        }

        let Some(base) = path.file_name().and_then(|s| s.to_str()) else {
            return Ok(Resolved::Skipped(SkipReason::UnparsableName));
        };
        let Some((artists, title)) = parse_file_name(base) else {
            return Ok(Resolved::Skipped(SkipReason::UnparsableName));
        };

        build_track(path, title, artists)
    }
}

/// Split `"<artists> - <title>.<ext>"` on the FIRST `-`.
///
/// The artist segment splits on `/` or `,`, one name per piece, trimmed;
/// empty pieces are dropped. The title segment loses its extension and
/// surrounding whitespace (the trim keeps re-runs from growing padding
/// around the `-`).
fn parse_file_name(base: &str) -> Option<(Vec<String>, String)> {
    let (artist_part, title_part) = base.split_once('-')?;

    let artists: Vec<String> = artist_part
        .split(['/', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    let title = Path::new(title_part)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(title_part)
        .trim()
        .to_string();

    Some((artists, title))
}

/// Inherited cleanup for malformed metadata titles: when a title contains
/// `/`, keep only what precedes the first `/`, then the first `-`.
fn clean_title(title: &str) -> String {
    if !title.contains('/') {
        return title.to_string();
    }
    let title = title.split('/').next().unwrap_or(title);
    let title = title.split('-').next().unwrap_or(title);
    title.trim().to_string()
}

/// True when `path` sits under a directory the placement engine created.
fn in_generated_tree(path: &Path) -> bool {
    let Some(dir) = path.parent() else {
        return false;
    };
    dir.components().any(|c| match c {
        Component::Normal(name) => {
            name == OsStr::new(ARTISTS_DIR) || name == OsStr::new(GENRE_DIR)
        }
        _ => false,
    })
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn build_track(path: &Path, title: String, artists: Vec<String>) -> Result<Resolved> {
    if title.is_empty() || artists.is_empty() {
        return Ok(Resolved::Skipped(SkipReason::EmptyIdentity));
    }

    let source_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("mp3")
        .to_string();

    Ok(Resolved::Track(Track {
        title,
        artists,
        genres: Vec::new(),
        source_dir,
        path: path.to_path_buf(),
        extension,
        canonical_artists: String::new(),
    }))
}
