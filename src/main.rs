//! # Medley - Multi-Index Music Catalog
//!
//! Command-line front end for the medley catalog. Every invocation scans
//! the music directory, builds the in-memory catalog from scratch and
//! answers one query against it.
//!
//! ## Usage
//!
//! ```bash
//! # List every catalogued song
//! medley list
//!
//! # Search by title
//! medley search "one more time"
//!
//! # Recommendations for a starting song
//! medley recommend "One More Time" --limit 3
//!
//! # Machine-readable output
//! medley --json genres
//! ```

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use medley::catalog::Catalog;
use medley::config::{self, CatalogConfig};
use medley::song::Song;
use medley::{cli, completion, scan};

/// Main entry point for the medley application.
///
/// Initializes logging, parses command-line arguments, builds the catalog
/// and routes the command to the matching catalog query.
///
/// # Logging
///
/// Uses the environment logger, controlled via `RUST_LOG`:
/// - `RUST_LOG=debug medley list` - Enable debug logging
/// - `RUST_LOG=medley::catalog=debug medley search x` - Module-specific
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completion generation needs no catalog, so handle it before any
    // filesystem work.
    if let cli::Command::Completion { shell } = &args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        return Ok(());
    }

    let music_dir = match args.music_dir.clone() {
        Some(dir) => dir,
        None => config::default_music_dir()?,
    };
    let catalog_config = CatalogConfig::default();
    let records = scan::scan_dir(&music_dir, &catalog_config)
        .with_context(|| format!("Failed to scan `{}`", music_dir.display()))?;

    let mut catalog = Catalog::new(catalog_config);
    let report = catalog.ingest_scan(records);
    info!(
        "Catalog ready: {} songs, {} rejected records",
        report.added.len(),
        report.rejected.len()
    );

    match args.command {
        cli::Command::List => {
            let songs = catalog.list_all();
            print_songs(&songs, args.json)?;
            if !args.json {
                println!("{} songs", songs.len());
            }
        }
        cli::Command::Genres => {
            let genres = catalog.list_genres();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&genres)?);
            } else {
                for genre in genres {
                    println!("{genre}");
                }
            }
        }
        cli::Command::Genre { name } => {
            let songs = catalog.songs_in_genre(&name);
            if songs.is_empty() && !args.json {
                println!("No songs in genre `{name}`");
            } else {
                print_songs(&songs, args.json)?;
            }
        }
        cli::Command::Search { query } => {
            let songs = catalog.search_by_title(&query);
            if songs.is_empty() && !args.json {
                println!("No songs matching `{query}`");
            } else {
                print_songs(&songs, args.json)?;
            }
        }
        cli::Command::Recommend { song, limit } => {
            let start = match catalog.search_by_title(&song).first() {
                Some(&start) => start.id,
                None => bail!("No song matching `{song}`"),
            };
            let songs = catalog.recommend(start, limit);
            if songs.is_empty() && !args.json {
                println!("No similar songs found");
            } else {
                print_songs(&songs, args.json)?;
            }
        }
        cli::Command::Info { id } => {
            let Some(song) = catalog.find_by_id(id) else {
                bail!("No song with id {id}");
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(song)?);
            } else {
                print_info(song);
            }
        }
        cli::Command::Completion { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn print_songs(songs: &[&Song], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(songs)?);
        return Ok(());
    }
    for song in songs {
        let year = song
            .year
            .map_or_else(String::new, |y| format!(", {y}"));
        println!(
            "[{}] {} - {} ({}{})",
            song.id, song.artist, song.title, song.genre, year
        );
    }
    Ok(())
}

fn print_info(song: &Song) {
    println!("Id:       {}", song.id);
    println!("Title:    {}", song.title);
    println!("Artist:   {}", song.artist);
    println!("Genre:    {}", song.genre);
    if let Some(year) = song.year {
        println!("Year:     {year}");
    }
    if let Some(duration) = song.duration_secs {
        println!("Duration: {duration}s");
    }
    println!("Path:     {}", song.path);
    println!("Plays:    {}", song.play_count);
    println!("Favorite: {}", song.favorite);
}
