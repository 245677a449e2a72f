//! Canonical naming: popularity-ranked artist credits and the in-place
//! rename that applies them.

use std::fs;

use crate::error::{Error, Result};
use crate::popularity::PopularityTable;
use crate::track::Track;

/// Order `artists` by popularity (highest count first, ties by ascending
/// name) and join with `", "`.
///
/// Requires the COMPLETE popularity snapshot; a partial table would order
/// the same credit differently from file to file within one run.
pub fn canonical_artist_order(artists: &[String], popularity: &PopularityTable) -> String {
    let mut ranked: Vec<&str> = artists.iter().map(String::as_str).collect();
    ranked.sort_by(|a, b| {
        popularity
            .count(b)
            .cmp(&popularity.count(a))
            .then_with(|| a.cmp(b))
    });
    ranked.join(", ")
}

/// Fill in the track's canonical artist order and rename the file to
/// `"<source dir>/<canonical artists> - <title>.<ext>"`.
///
/// Renaming onto the current path is a no-op, so re-runs are stable. A
/// destination held by a different file is fatal: overwriting it would
/// destroy data.
pub fn rename_in_place(track: &mut Track, popularity: &PopularityTable) -> Result<()> {
    track.canonical_artists = canonical_artist_order(&track.artists, popularity);

    let dest = track.source_dir.join(track.canonical_file_name());
    if dest == track.path {
        return Ok(());
    }
    if dest.exists() {
        return Err(Error::DestinationOccupied {
            from: track.path.clone(),
            to: dest,
        });
    }

    fs::rename(&track.path, &dest).map_err(|source| Error::Io {
        path: track.path.clone(),
        source,
    })?;
    track.path = dest;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn table(counts: &[(&str, u32)]) -> PopularityTable {
        let mut out = PopularityTable::new();
        for (artist, count) in counts {
            for _ in 0..*count {
                out.bump(artist);
            }
        }
        out
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn orders_by_count_descending() {
        let popularity = table(&[("Foo", 3), ("Bar", 1)]);
        assert_eq!(
            canonical_artist_order(&strings(&["Bar", "Foo"]), &popularity),
            "Foo, Bar"
        );
    }

    #[test]
    fn ties_fall_back_to_ascending_name() {
        let popularity = table(&[("Zeta", 2), ("Alpha", 2)]);
        assert_eq!(
            canonical_artist_order(&strings(&["Zeta", "Alpha"]), &popularity),
            "Alpha, Zeta"
        );
    }

    #[test]
    fn unseen_artists_rank_at_zero() {
        let popularity = table(&[("Known", 1)]);
        assert_eq!(
            canonical_artist_order(&strings(&["Ghost", "Known"]), &popularity),
            "Known, Ghost"
        );
    }

    fn track_at(dir: &Path, file: &str) -> Track {
        let path = dir.join(file);
        std::fs::write(&path, b"bytes").unwrap();
        Track {
            title: "Tune".into(),
            artists: vec!["Foo".into(), "Bar".into()],
            genres: vec![],
            source_dir: dir.to_path_buf(),
            path,
            extension: "mp3".into(),
            canonical_artists: String::new(),
        }
    }

    #[test]
    fn renames_into_the_source_directory() {
        let tmp = TempDir::new().unwrap();
        let mut track = track_at(tmp.path(), "whatever.mp3");
        let popularity = table(&[("Foo", 2), ("Bar", 1)]);

        rename_in_place(&mut track, &popularity).unwrap();

        assert_eq!(track.path, tmp.path().join("Foo, Bar - Tune.mp3"));
        assert!(track.path.is_file());
        assert!(!tmp.path().join("whatever.mp3").exists());
    }

    #[test]
    fn renaming_onto_itself_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let mut track = track_at(tmp.path(), "Foo, Bar - Tune.mp3");
        let popularity = table(&[("Foo", 2), ("Bar", 1)]);

        rename_in_place(&mut track, &popularity).unwrap();
        assert_eq!(track.path, tmp.path().join("Foo, Bar - Tune.mp3"));
        assert!(track.path.is_file());
    }

    #[test]
    fn occupied_destination_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut track = track_at(tmp.path(), "other.mp3");
        std::fs::write(tmp.path().join("Foo, Bar - Tune.mp3"), b"unrelated").unwrap();
        let popularity = table(&[("Foo", 2), ("Bar", 1)]);

        let result = rename_in_place(&mut track, &popularity);
        assert!(matches!(result, Err(Error::DestinationOccupied { .. })));
        // The unrelated file keeps its content.
        assert_eq!(
            std::fs::read(tmp.path().join("Foo, Bar - Tune.mp3")).unwrap(),
            b"unrelated"
        );
    }
}
