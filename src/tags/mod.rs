//! ID3 tag read/write.
//!
//! Public API:
//! - [`read_song_tags`] reads the identity-bearing fields out of an MP3.
//! - [`write_song_tags`] persists resolved fields back to disk.

mod read;
mod write;

pub use read::read_song_tags;
pub use write::write_song_tags;

/// The identity-bearing subset of a file's embedded metadata.
///
/// `artist` is a single string; multiple credits are `/`-joined, matching
/// how multi-artist ID3 tags are written in the wild.
#[derive(Debug, Clone, Default)]
pub struct SongTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
}
