//! Library enumeration: find every MP3 under the musics root.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Discover every `.mp3` under `root`, recursively.
///
/// Paths come back sorted so the pipeline sees files in a stable order
/// regardless of directory iteration order. An empty library is an error:
/// there is nothing to classify.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dir(root, &mut out)?;
    if out.is_empty() {
        return Err(Error::EmptyLibrary(root.to_path_buf()));
    }
    out.sort();
    Ok(out)
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if is_mp3(&path) {
            out.push(path);
        }
    }

    Ok(())
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
