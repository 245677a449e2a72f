//! rondo
//!
//! Classify a directory tree of MP3s by artist and genre.
//!
//! One run:
//! - resolve each file's (title, artists) identity from its tags or its
//!   file name, per configuration
//! - rank every artist by how often they appear across the whole collection
//! - rename each file to `"<artists by popularity> - <title>.mp3"`
//! - optionally fan files out into `Artists/<name>/` (hard links) and
//!   `Genre/<tag>/` (copies) trees
//! - optionally print the popularity table
//!
//! Renaming depends on the final popularity counts, so the run is two full
//! passes over the collection: identities first, names second.

mod config;
mod error;
mod genres;
mod identity;
mod library;
mod naming;
mod pipeline;
mod placement;
mod popularity;
mod tags;
mod track;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::genres::GenreTable;
use crate::pipeline::Pipeline;

/// Classify and organize an MP3 collection by artist and genre.
#[derive(Parser)]
#[command(name = "rondo", about = "Classify and organize an MP3 collection")]
struct Cli {
    /// Run configuration file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Artist -> genres lookup table.
    #[arg(long, default_value = "genres.json")]
    genres: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rondo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let genre_table = GenreTable::load(&cli.genres)?;

    let paths = library::scan(&config.musics_dir)?;
    info!(
        files = paths.len(),
        root = %config.musics_dir.display(),
        "library scanned"
    );

    let pipeline = Pipeline::new(&config, &genre_table);

    let (mut tracks, popularity) = pipeline.collect(&paths)?;
    pipeline.finalize(&mut tracks, &popularity)?;
    pipeline.place(&tracks)?;

    if config.print_popularity {
        for (artist, count) in popularity.ranked() {
            println!("{artist}: {count}");
        }
    }

    Ok(())
}
