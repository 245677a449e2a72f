//! The two-phase classification pipeline.
//!
//! Phase 1 ([`Pipeline::collect`]) resolves every input file to a [`Track`],
//! accumulates artist popularity, resolves genres, and persists identity
//! back into the files' tags. Phase 2 ([`Pipeline::finalize`]) may only run
//! once phase 1 has seen the WHOLE collection: canonical ordering depends
//! on the final counts, so a partial snapshot would name files
//! inconsistently within a single run.
//!
//! Both phases return their results as values; there is no shared ambient
//! state between them.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::genres::GenreTable;
use crate::identity::{self, IdentityResolver, Resolved};
use crate::naming;
use crate::placement;
use crate::popularity::PopularityTable;
use crate::tags::{self, SongTags};
use crate::track::Track;

pub struct Pipeline<'a> {
    config: &'a Config,
    genres: &'a GenreTable,
    resolver: Box<dyn IdentityResolver>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, genres: &'a GenreTable) -> Self {
        Self {
            config,
            genres,
            resolver: identity::for_origin(config),
        }
    }

    /// Phase 1: resolve identities, accumulate popularity, write tags back.
    ///
    /// Skipped files are reported (when configured) and dropped. Resolving
    /// zero tracks overall is an error: the run has nothing to do.
    pub fn collect(&self, paths: &[PathBuf]) -> Result<(Vec<Track>, PopularityTable)> {
        let mut tracks = Vec::new();
        let mut popularity = PopularityTable::new();

        for path in paths {
            let mut track = match self.resolver.resolve(path)? {
                Resolved::Track(track) => track,
                Resolved::Skipped(reason) => {
                    if self.config.print_error_logs {
                        warn!("{}: {}", reason, path.display());
                    }
                    continue;
                }
            };

            credit_artists(
                &mut popularity,
                &track.artists,
                &track.title,
                self.config.title_mention_bonus,
            );

            track.genres = self.genres.for_artists(&track.artists);

            // Second genre lookup on purpose: the table is read-only and
            // cheap, and the write-back queries it instead of borrowing
            // from the track it is persisting.
            tags::write_song_tags(
                &track.path,
                &SongTags {
                    title: Some(track.title.clone()),
                    artist: Some(track.artists.join("/")),
                    genre: Some(self.genres.for_artists(&track.artists).join(", ")),
                },
            )?;

            tracks.push(track);
        }

        if tracks.is_empty() {
            return Err(Error::EmptyResolve);
        }

        info!(tracks = tracks.len(), "identity pass complete");
        Ok((tracks, popularity))
    }

    /// Phase 2: canonical naming over the complete popularity snapshot.
    pub fn finalize(&self, tracks: &mut [Track], popularity: &PopularityTable) -> Result<()> {
        for track in tracks.iter_mut() {
            naming::rename_in_place(track, popularity)?;
        }
        info!("naming pass complete");
        Ok(())
    }

    /// Distribute finalized tracks into the artist/genre view trees.
    pub fn place(&self, tracks: &[Track]) -> Result<()> {
        for track in tracks {
            if self.config.save_per_artist {
                placement::place_per_artist(track, &self.config.musics_dir)?;
            }
            if self.config.save_per_genre {
                placement::place_per_genre(track, &self.config.musics_dir)?;
            }
        }
        Ok(())
    }
}

/// One popularity credit per credited artist, plus one more when the title
/// mentions the artist by name (self-titled and featured tracks rank their
/// artist up).
fn credit_artists(
    popularity: &mut PopularityTable,
    artists: &[String],
    title: &str,
    mention_bonus: bool,
) {
    for artist in artists {
        popularity.bump(artist);
        if mention_bonus && title.contains(artist.as_str()) {
            popularity.bump(artist);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::config::NameOrigin;
    use crate::genres::GenreEntry;
    use crate::library;

    #[test]
    fn mention_bonus_doubles_the_credit() {
        let artists = vec!["Daft Punk".to_string()];
        let mut popularity = PopularityTable::new();
        credit_artists(&mut popularity, &artists, "Daft Punk - One More Time", true);
        assert_eq!(popularity.count("Daft Punk"), 2);

        let mut popularity = PopularityTable::new();
        credit_artists(&mut popularity, &artists, "One More Time", true);
        assert_eq!(popularity.count("Daft Punk"), 1);
    }

    #[test]
    fn mention_bonus_can_be_disabled() {
        let artists = vec!["Daft Punk".to_string()];
        let mut popularity = PopularityTable::new();
        credit_artists(&mut popularity, &artists, "Daft Punk - One More Time", false);
        assert_eq!(popularity.count("Daft Punk"), 1);
    }

    fn file_name_config(root: &Path) -> Config {
        Config {
            musics_dir: root.to_path_buf(),
            name_origin: NameOrigin::FileName,
            save_per_artist: true,
            save_per_genre: true,
            print_popularity: false,
            print_error_logs: false,
            title_cleanup: true,
            title_mention_bonus: true,
        }
    }

    fn genre_table() -> GenreTable {
        GenreTable::from_entries(vec![GenreEntry {
            artist: "Foo".into(),
            genres: vec!["House".into()],
        }])
    }

    #[test]
    fn classifies_a_small_collection_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("Foo - Track1.mp3"), b"one").unwrap();
        fs::write(root.join("Foo, Bar - Track2.mp3"), b"two").unwrap();

        let config = file_name_config(root);
        let genres = genre_table();
        let pipeline = Pipeline::new(&config, &genres);

        let paths = library::scan(root).unwrap();
        let (mut tracks, popularity) = pipeline.collect(&paths).unwrap();

        // Foo appears on both files, Bar on one.
        assert_eq!(popularity.count("Foo"), 2);
        assert_eq!(popularity.count("Bar"), 1);

        pipeline.finalize(&mut tracks, &popularity).unwrap();

        // Both files were already canonically named, so they stay put.
        assert!(root.join("Foo - Track1.mp3").is_file());
        assert!(root.join("Foo, Bar - Track2.mp3").is_file());

        pipeline.place(&tracks).unwrap();
        assert!(
            root.join("Artists/Foo/Foo - Track1.mp3").is_file()
        );
        assert!(
            root.join("Artists/Foo/Foo, Bar - Track2.mp3").is_file()
        );
        assert!(
            root.join("Artists/Bar/Foo, Bar - Track2.mp3").is_file()
        );
        // Foo is in the genre table; Bar alone never occurs, so only the
        // union genre view exists.
        assert!(
            root.join("Genre/House/Foo - Track1.mp3").is_file()
        );
    }

    #[test]
    fn rerunning_the_whole_pipeline_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("Bar - Bar Anthem.mp3"), b"bytes").unwrap();

        let config = file_name_config(root);
        let genres = genre_table();

        for _ in 0..2 {
            let pipeline = Pipeline::new(&config, &genres);
            // Rescan each round: placement added link/copy views, and the
            // generated-output guard must keep them out of the next run.
            let paths = library::scan(root).unwrap();
            let (mut tracks, popularity) = pipeline.collect(&paths).unwrap();
            // Title "Bar Anthem" mentions the artist: 1 + 1.
            assert_eq!(popularity.count("Bar"), 2);
            pipeline.finalize(&mut tracks, &popularity).unwrap();
            pipeline.place(&tracks).unwrap();
        }

        assert!(root.join("Bar - Bar Anthem.mp3").is_file());
        let placed = root.join("Artists/Bar");
        assert_eq!(fs::read_dir(&placed).unwrap().count(), 1);
        let genre_view = root.join("Genre/UNKNOWN");
        assert_eq!(fs::read_dir(&genre_view).unwrap().count(), 1);
    }

    #[test]
    fn unparsable_files_are_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("no_separator.mp3"), b"x").unwrap();
        fs::write(root.join("Foo - Ok.mp3"), b"x").unwrap();

        let config = file_name_config(root);
        let genres = genre_table();
        let pipeline = Pipeline::new(&config, &genres);

        let paths = library::scan(root).unwrap();
        let (tracks, _) = pipeline.collect(&paths).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Ok");
    }

    #[test]
    fn resolving_nothing_at_all_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("garbage.mp3"), b"x").unwrap();

        let config = file_name_config(root);
        let genres = genre_table();
        let pipeline = Pipeline::new(&config, &genres);

        let paths = library::scan(root).unwrap();
        assert!(matches!(
            pipeline.collect(&paths),
            Err(Error::EmptyResolve)
        ));
    }

    #[test]
    fn collect_writes_identity_back_into_tags() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("Foo - Track1.mp3"), b"payload").unwrap();

        let config = file_name_config(root);
        let genres = genre_table();
        let pipeline = Pipeline::new(&config, &genres);

        let paths = library::scan(root).unwrap();
        pipeline.collect(&paths).unwrap();

        let tags = tags::read_song_tags(&root.join("Foo - Track1.mp3")).unwrap();
        assert_eq!(tags.title.as_deref(), Some("Track1"));
        assert_eq!(tags.artist.as_deref(), Some("Foo"));
        assert_eq!(tags.genre.as_deref(), Some("House"));
    }
}
