//! Read the identity fields of an MP3's ID3 tag.

use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike};

use super::SongTags;
use crate::error::{Error, Result};

/// Read title/artist/genre from `path`.
///
/// A file with no ID3 tag at all is not an error: it reads as an empty
/// [`SongTags`] and the caller decides whether to skip it. Any other
/// failure (corrupt tag, unreadable file) aborts the run.
pub fn read_song_tags(path: &Path) -> Result<SongTags> {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => return Ok(SongTags::default()),
        Err(source) => {
            return Err(Error::TagRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(SongTags {
        title: tag
            .title()
            .map(str::to_owned)
            .or_else(|| text_frame(&tag, "TIT2")),
        artist: tag
            .artist()
            .map(str::to_owned)
            .or_else(|| text_frame(&tag, "TPE1")),
        genre: text_frame(&tag, "TCON"),
    })
}

/// Get a best-effort string value from a frame id.
/// Defensive on purpose: some frames that are "text-ish" may not be
/// `Content::Text`.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),

        // Some crate versions surface a string via link frames too.
        Content::Link(s) => Some(s.clone()),

        _ => None,
    }
}
