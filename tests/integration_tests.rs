//! # Integration Tests for Medley
//!
//! End-to-end tests exercising the full pipeline from a user perspective:
//! scanning a real (temporary) music directory, building the catalog, and
//! running query and playback workflows across all indexes at once.

use anyhow::Result;
use medley::catalog::{Catalog, SongUpdate};
use medley::config::CatalogConfig;
use medley::error::CatalogError;
use medley::scan;
use medley::song::{ScanRecord, SongId};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

/// Test helper to create a temporary music directory with sample files
fn create_test_music_dir() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let rock = temp_dir.path().join("rock");
    std::fs::create_dir(&rock)?;

    for name in [
        "Ana - Alpha.mp3",
        "Bob - Beta.flac",
        "Cleo - Gamma.ogg",
        "cover.jpg",
        "liner-notes.txt",
    ] {
        File::create(rock.join(name))?;
    }
    File::create(temp_dir.path().join("Dee - Delta.wav"))?;
    Ok(temp_dir)
}

fn record(title: &str, artist: &str, genre: &str, year: Option<u32>) -> ScanRecord {
    ScanRecord {
        path: format!("/music/{artist} - {title}.mp3"),
        title: title.to_string(),
        artist: Some(artist.to_string()),
        genre: Some(genre.to_string()),
        year,
    }
}

mod scan_to_catalog {
    use super::*;

    #[test]
    fn test_scan_and_ingest_full_directory() -> Result<()> {
        let music = create_test_music_dir()?;
        let config = CatalogConfig::default();
        let records = scan::scan_dir(music.path(), &config)?;
        assert_eq!(records.len(), 4, "non-music files are filtered out");

        let mut catalog = Catalog::new(config);
        let report = catalog.ingest_scan(records);
        assert_eq!(report.added.len(), 4);
        assert!(report.rejected.is_empty());
        assert_eq!(catalog.len(), 4);

        // Inferred metadata is queryable through the indexes.
        let hits = catalog.search_by_title("alpha");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].artist, "Ana");
        // No tags on disk, so everything lands in the fallback genre.
        assert_eq!(catalog.list_genres(), ["Unknown"]);
        assert_eq!(catalog.songs_in_genre("Unknown").len(), 4);
        Ok(())
    }

    #[test]
    fn test_rescanning_the_same_tree_rejects_duplicates() -> Result<()> {
        let music = create_test_music_dir()?;
        let config = CatalogConfig::default();
        let records = scan::scan_dir(music.path(), &config)?;

        let mut catalog = Catalog::new(config);
        catalog.ingest_scan(records.clone());
        let report = catalog.ingest_scan(records);

        assert!(report.added.is_empty());
        assert_eq!(report.rejected.len(), 4);
        assert!(report
            .rejected
            .iter()
            .all(|(_, err)| matches!(err, CatalogError::DuplicatePath(_))));
        assert_eq!(catalog.len(), 4);
        Ok(())
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let config = CatalogConfig::default();
        assert!(scan::scan_dir(Path::new("/definitely/not/here"), &config).is_err());
    }
}

mod query_workflows {
    use super::*;

    fn catalog_with_rock_pair() -> Catalog {
        let mut catalog = Catalog::default();
        catalog
            .ingest(record("Alpha", "Ana", "Rock", Some(2000)))
            .expect("ingest");
        catalog
            .ingest(record("Beta", "Bob", "Rock", Some(2001)))
            .expect("ingest");
        catalog
            .ingest(record("Gamma", "Cleo", "Jazz", Some(1970)))
            .expect("ingest");
        catalog
    }

    #[test]
    fn test_recommendations_follow_shared_genre_and_year() {
        let catalog = catalog_with_rock_pair();
        // Alpha and Beta share a genre and sit one year apart, so each is
        // the other's strongest (and only) recommendation.
        let for_alpha: Vec<SongId> = catalog.recommend(1, 5).iter().map(|s| s.id).collect();
        assert_eq!(for_alpha, [2]);
        let for_beta: Vec<SongId> = catalog.recommend(2, 5).iter().map(|s| s.id).collect();
        assert_eq!(for_beta, [1]);
        // Gamma shares nothing with anyone.
        assert!(catalog.recommend(3, 5).is_empty());
    }

    #[test]
    fn test_substring_search_spans_the_whole_catalog() {
        let mut catalog = catalog_with_rock_pair();
        catalog
            .ingest(record("Alphaville Nights", "Dee", "Pop", None))
            .expect("ingest");

        // "alpha" matches one title exactly, so only that one comes back.
        assert_eq!(catalog.search_by_title("ALPHA").len(), 1);
        // "alphav" matches nothing exactly and falls back to substrings.
        let hits = catalog.search_by_title("alphav");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Alphaville Nights");
    }

    #[test]
    fn test_update_keeps_every_index_in_step() {
        let mut catalog = catalog_with_rock_pair();
        catalog
            .update_song(
                3,
                SongUpdate {
                    title: Some("Gamma Ray".to_string()),
                    genre: Some("Rock".to_string()),
                    year: Some(2000),
                    ..SongUpdate::default()
                },
            )
            .expect("update");

        assert!(catalog.search_by_title("gamma").iter().any(|s| s.id == 3));
        assert_eq!(catalog.list_genres(), ["Rock"], "empty bucket pruned");
        assert_eq!(catalog.songs_in_genre("Rock").len(), 3);
        // The updated song now recommends (and is recommended by) its
        // new genre neighbors.
        assert!(!catalog.recommend(3, 5).is_empty());
        assert!(catalog.recommend(1, 5).iter().any(|s| s.id == 3));
    }

    #[test]
    fn test_delete_is_atomic_across_all_indexes() {
        let mut catalog = catalog_with_rock_pair();
        catalog.create_playlist("mix").expect("create");
        catalog.add_to_playlist("mix", 1).expect("add");
        catalog.enqueue(1).expect("enqueue");
        catalog.play_song(1).expect("play");

        let deleted = catalog.delete_song(1).expect("delete");
        assert_eq!(deleted.title, "Alpha");

        assert!(catalog.find_by_id(1).is_none());
        assert!(catalog.search_by_title("alpha").is_empty());
        assert!(catalog.songs_in_genre("Rock").iter().all(|s| s.id != 1));
        assert!(catalog.recommend(2, 5).is_empty());
        assert!(catalog.playlist_songs("mix").expect("songs").is_empty());
        assert!(catalog.queued().is_empty());
        assert!(catalog.history(10).is_empty());
    }
}

mod playback_workflows {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog
            .ingest(record("Alpha", "Ana", "Rock", Some(2000)))
            .expect("ingest");
        catalog
            .ingest(record("Beta", "Bob", "Rock", Some(2001)))
            .expect("ingest");
        catalog
            .ingest(record("Gamma", "Cleo", "Jazz", Some(1970)))
            .expect("ingest");
        catalog
    }

    #[test]
    fn test_history_reads_most_recent_first() {
        let mut catalog = catalog();
        for id in [1, 2, 3] {
            catalog.play_song(id).expect("play");
        }
        let recent: Vec<SongId> = catalog.history(2).iter().map(|s| s.id).collect();
        assert_eq!(recent, [3, 2]);
    }

    #[test]
    fn test_queue_drains_in_arrival_order_with_repeats() {
        let mut catalog = catalog();
        for id in [1, 2, 1] {
            catalog.enqueue(id).expect("enqueue");
        }
        let order: Vec<SongId> = catalog.queued().iter().map(|s| s.id).collect();
        assert_eq!(order, [1, 2, 1]);
        assert_eq!(catalog.dequeue().map(|s| s.id), Some(1));
        assert_eq!(catalog.dequeue().map(|s| s.id), Some(2));
        assert_eq!(catalog.dequeue().map(|s| s.id), Some(1));
        assert_eq!(catalog.dequeue().map(|s| s.id), None);
    }

    #[test]
    fn test_previous_then_next_returns_to_the_same_song() {
        let mut catalog = catalog();
        catalog.play_song(1).expect("play");
        catalog.play_song(2).expect("play");

        assert_eq!(catalog.play_previous().map(|s| s.id), Some(1));
        // The song we stepped away from comes right back.
        assert_eq!(catalog.play_next().map(|s| s.id), Some(2));
        assert_eq!(catalog.active().map(|s| s.id), Some(2));
    }

    #[test]
    fn test_play_next_falls_back_to_recommendation_then_random() {
        let mut catalog = catalog();
        catalog.play_song(1).expect("play");
        // Queue empty: the strongest recommendation for Alpha is Beta.
        assert_eq!(catalog.play_next().map(|s| s.id), Some(2));

        // From Gamma (no edges, empty queue) something still plays.
        catalog.play_song(3).expect("play");
        assert!(catalog.play_next().is_some());
    }

    #[test]
    fn test_deleted_songs_vanish_from_history_and_queue() {
        let mut catalog = catalog();
        catalog.play_song(1).expect("play");
        catalog.play_song(2).expect("play");
        catalog.enqueue(1).expect("enqueue");
        catalog.delete_song(1).expect("delete");

        let recent: Vec<SongId> = catalog.history(10).iter().map(|s| s.id).collect();
        assert_eq!(recent, [2]);
        assert!(catalog.queued().is_empty());
        assert!(catalog.dequeue().is_none());
    }

    #[test]
    fn test_bounded_history_and_queue_evict_oldest() {
        let config = CatalogConfig {
            history_limit: Some(2),
            queue_limit: Some(2),
            ..CatalogConfig::default()
        };
        let mut catalog = Catalog::new(config);
        for title in ["A", "B", "C"] {
            catalog
                .ingest(record(title, "X", "Rock", None))
                .expect("ingest");
        }

        for id in [1, 2, 3] {
            catalog.play_song(id).expect("play");
            catalog.enqueue(id).expect("enqueue");
        }
        let recent: Vec<SongId> = catalog.history(10).iter().map(|s| s.id).collect();
        assert_eq!(recent, [3, 2]);
        let queued: Vec<SongId> = catalog.queued().iter().map(|s| s.id).collect();
        assert_eq!(queued, [2, 3]);
    }
}

mod playlist_workflows {
    use super::*;

    #[test]
    fn test_playlist_navigation_round_trip() {
        let mut catalog = Catalog::default();
        for title in ["A", "B", "C"] {
            catalog
                .ingest(record(title, "X", "Rock", None))
                .expect("ingest");
        }
        catalog.create_playlist("trip").expect("create");
        for id in [1, 2, 3] {
            catalog.add_to_playlist("trip", id).expect("add");
        }

        assert_eq!(catalog.playlist_next("trip").expect("next").map(|s| s.id), Some(1));
        assert_eq!(catalog.playlist_next("trip").expect("next").map(|s| s.id), Some(2));
        assert_eq!(catalog.playlist_prev("trip").expect("prev").map(|s| s.id), Some(1));
        // At the head: no movement, not an error.
        assert!(catalog.playlist_prev("trip").expect("prev").is_none());

        let forward: Vec<SongId> = catalog
            .playlist_songs("trip")
            .expect("songs")
            .iter()
            .map(|s| s.id)
            .collect();
        let backward: Vec<SongId> = catalog
            .playlist_songs_rev("trip")
            .expect("songs")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(forward, [1, 2, 3]);
        assert_eq!(backward, [3, 2, 1]);
    }

    #[test]
    fn test_song_can_repeat_across_and_within_playlists() {
        let mut catalog = Catalog::default();
        catalog
            .ingest(record("A", "X", "Rock", None))
            .expect("ingest");
        catalog.create_playlist("one").expect("create");
        catalog.create_playlist("two").expect("create");
        catalog.add_to_playlist("one", 1).expect("add");
        catalog.add_to_playlist("one", 1).expect("add");
        catalog.add_to_playlist("two", 1).expect("add");

        assert_eq!(catalog.playlist_songs("one").expect("songs").len(), 2);
        assert_eq!(catalog.playlist_songs("two").expect("songs").len(), 1);
        assert_eq!(catalog.playlist_names(), ["one", "two"]);
    }
}
