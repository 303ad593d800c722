//! Filesystem scan: turns a music directory into raw [`ScanRecord`]s.
//!
//! This is the catalog's external collaborator, kept at arm's length: it
//! produces records and nothing else. It does not deduplicate (the
//! catalog rejects duplicate paths itself) and it never touches any
//! index structure.
//!
//! Metadata is inferred from filenames: `"Artist - Title.ext"` splits on
//! the first `" - "`, anything else becomes a bare title. Results are
//! sorted by path so repeated scans of the same tree ingest in the same
//! order.

use crate::config::CatalogConfig;
use crate::song::ScanRecord;
use anyhow::{ensure, Context, Result};
use log::{debug, info};
use path_absolutize::Absolutize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Walks `music_dir` up to the configured depth and returns one record
/// per recognized music file, sorted by path.
///
/// # Errors
///
/// Fails when the directory does not exist, is not a directory, or a
/// subdirectory cannot be read.
pub fn scan_dir(music_dir: &Path, config: &CatalogConfig) -> Result<Vec<ScanRecord>> {
    ensure!(
        music_dir.exists(),
        "Music directory `{}` does not exist",
        music_dir.display()
    );
    ensure!(
        music_dir.is_dir(),
        "`{}` is not a directory",
        music_dir.display()
    );

    let mut files = Vec::new();
    collect_files(music_dir, config, config.scan_depth, &mut files)?;
    files.sort();
    info!(
        "Scan found {} candidate files under {}",
        files.len(),
        music_dir.display()
    );

    // Inference is pure per-file work, so fan it out.
    files
        .par_iter()
        .map(|path| infer_record(path))
        .collect::<Result<Vec<_>>>()
}

fn collect_files(
    dir: &Path,
    config: &CatalogConfig,
    depth_left: u32,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read music directory `{}`", dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read an entry under `{}`", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            if depth_left > 0 {
                collect_files(&path, config, depth_left - 1, out)?;
            } else {
                debug!("Scan depth exhausted, skipping `{}`", path.display());
            }
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if config.is_music_extension(ext) => out.push(path),
            _ => {}
        }
    }
    Ok(())
}

/// Builds a scan record for one file, normalizing the path to an absolute
/// form so duplicate detection compares like with like.
///
/// # Errors
///
/// Fails when the path cannot be absolutized (e.g. no working directory).
pub fn infer_record(path: &Path) -> Result<ScanRecord> {
    let absolute = path
        .absolutize()
        .with_context(|| format!("Failed to absolutize `{}`", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let (artist, title) = split_artist_title(stem);

    Ok(ScanRecord {
        path: absolute.to_string_lossy().into_owned(),
        title,
        artist,
        genre: None,
        year: None,
    })
}

/// Splits `"Artist - Title"` stems on the first `" - "`. Stems without the
/// separator are all title, with no artist inferred.
#[must_use]
pub fn split_artist_title(stem: &str) -> (Option<String>, String) {
    match stem.split_once(" - ") {
        Some((artist, title)) => (Some(artist.trim().to_string()), title.trim().to_string()),
        None => (None, stem.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).expect("create test file");
    }

    #[test]
    fn test_split_artist_title() {
        assert_eq!(
            split_artist_title("Daft Punk - One More Time"),
            (Some("Daft Punk".to_string()), "One More Time".to_string())
        );
        assert_eq!(split_artist_title("Intro"), (None, "Intro".to_string()));
        // Only the first separator splits.
        assert_eq!(
            split_artist_title("A - B - C"),
            (Some("A".to_string()), "B - C".to_string())
        );
    }

    #[test]
    fn test_scan_filters_extensions_and_sorts() {
        let tmp = TempDir::new().expect("tempdir");
        touch(tmp.path(), "b.mp3");
        touch(tmp.path(), "a.flac");
        touch(tmp.path(), "notes.txt");

        let records = scan_dir(tmp.path(), &CatalogConfig::default()).expect("scan");
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
        assert!(records.iter().all(|r| Path::new(&r.path).is_absolute()));
    }

    #[test]
    fn test_scan_respects_depth_limit() {
        let tmp = TempDir::new().expect("tempdir");
        let sub = tmp.path().join("deep");
        fs::create_dir(&sub).expect("mkdir");
        touch(tmp.path(), "top.mp3");
        touch(&sub, "nested.mp3");

        let shallow = CatalogConfig {
            scan_depth: 0,
            ..CatalogConfig::default()
        };
        let records = scan_dir(tmp.path(), &shallow).expect("scan");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "top");

        let records = scan_dir(tmp.path(), &CatalogConfig::default()).expect("scan");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope");
        assert!(scan_dir(&missing, &CatalogConfig::default()).is_err());
    }
}
