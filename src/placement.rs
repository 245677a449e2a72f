//! Placement: materialize artist and genre views of a finalized track.
//!
//! Per-artist views hard-link the renamed file; per-genre views copy its
//! bytes, so the two trees never share an inode and can diverge later.
//! Both operations are silent no-ops when the destination already exists,
//! which makes re-running a classification safe.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::track::Track;

/// Directory the per-artist views live under.
pub(crate) const ARTISTS_DIR: &str = "Artists";
/// Directory the per-genre views live under.
pub(crate) const GENRE_DIR: &str = "Genre";

/// Hard link the track into `<musics root>/Artists/<artist>/` for every
/// credited artist.
pub fn place_per_artist(track: &Track, musics_root: &Path) -> Result<()> {
    for artist in &track.artists {
        let dir = musics_root.join(ARTISTS_DIR).join(artist);
        ensure_dir(&dir)?;
        link_file(&track.path, &dir.join(track.canonical_file_name()))?;
    }
    Ok(())
}

/// Copy the track into `<musics root>/Genre/<genre>/` for every resolved
/// genre tag.
pub fn place_per_genre(track: &Track, musics_root: &Path) -> Result<()> {
    for genre in &track.genres {
        let dir = musics_root.join(GENRE_DIR).join(genre);
        ensure_dir(&dir)?;
        copy_file(&track.path, &dir.join(track.canonical_file_name()))?;
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Hard link `src` at `dst`; an existing `dst` is left untouched.
fn link_file(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Ok(());
    }
    fs::hard_link(src, dst).map_err(|source| Error::Io {
        path: dst.to_path_buf(),
        source,
    })
}

/// Copy `src` to `dst`; an existing `dst` is left untouched.
fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Ok(());
    }
    fs::copy(src, dst).map_err(|source| Error::Io {
        path: dst.to_path_buf(),
        source,
    })?;
    Ok(())
}
