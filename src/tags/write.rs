//! Write resolved identity fields back to an MP3, preserving everything
//! else the tag already carries.

use std::path::Path;

use id3::{Tag, TagLike, Version};

use super::SongTags;
use crate::error::{Error, Result};

/// Helper: set/remove a plain text frame (T***)
fn set_text_opt(tag: &mut Tag, id: &str, v: Option<&str>) {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => tag.set_text(id, s.to_string()),
        _ => {
            tag.remove(id);
        }
    }
}

/// Persist `tags` into the file at `path`.
///
/// Loads the existing tag first so unrelated frames survive, then writes
/// back as ID3v2.4. `None` (or blank) fields remove the frame.
pub fn write_song_tags(path: &Path, tags: &SongTags) -> Result<()> {
    let mut tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());

    set_text_opt(&mut tag, "TIT2", tags.title.as_deref());
    set_text_opt(&mut tag, "TPE1", tags.artist.as_deref());
    set_text_opt(&mut tag, "TCON", tags.genre.as_deref());

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|source| Error::TagWrite {
            path: path.to_path_buf(),
            source,
        })
}
