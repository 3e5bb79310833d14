// tests/test_rotation.rs
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use dirmark::info;
use dirmark::loggers::core::LogLevel;
use dirmark::loggers::{LoggerBuilder, rotate};

fn archives_in(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).expect("read_dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().map(|ext| ext == "gz").unwrap_or(false) {
            found.push(path);
        }
    }
    found
}

fn extract_single_entry(archive: &Path) -> (PathBuf, String) {
    let file = std::fs::File::open(archive).expect("archive file");
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    let mut entries = tar.entries().expect("tar entries");

    let mut entry = entries.next().expect("one entry").expect("entry");
    let name = entry.path().expect("entry path").into_owned();
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("entry content");
    assert!(entries.next().is_none(), "exactly one entry expected");

    (name, content)
}

#[test]
fn archive_helper_preserves_bytes_and_removes_the_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("direct.log");
    std::fs::write(&log_path, b"alpha\nbeta\n").expect("seed log");

    rotate::archive(&log_path).expect("archive");

    assert!(!log_path.exists(), "active file removed after archiving");
    let archives = archives_in(dir.path());
    assert_eq!(archives.len(), 1);

    let (name, content) = extract_single_entry(&archives[0]);
    assert!(name.to_string_lossy().ends_with("direct.log"));
    assert_eq!(content, "alpha\nbeta\n");
}

#[test]
fn rapid_rotations_keep_every_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("storm.log");

    // two rotations back to back, typically inside the same second
    std::fs::write(&log_path, b"first batch\n").expect("seed log");
    rotate::archive(&log_path).expect("first archive");
    std::fs::write(&log_path, b"second batch\n").expect("reseed log");
    rotate::archive(&log_path).expect("second archive");

    let archives = archives_in(dir.path());
    assert_eq!(archives.len(), 2, "an archive name collision must not clobber");

    let mut contents: Vec<String> = archives
        .iter()
        .map(|path| extract_single_entry(path).1)
        .collect();
    contents.sort();
    assert_eq!(
        contents,
        vec!["first batch\n".to_string(), "second batch\n".to_string()]
    );
}

#[test]
fn archiving_a_missing_source_fails_without_panicking() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ghost = dir.path().join("ghost.log");

    // the writer loop reports this error through its diagnostic sink
    assert!(rotate::archive(&ghost).is_err());
    assert!(!ghost.exists());
}

#[tokio::test]
async fn crossing_the_threshold_archives_and_restarts_the_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    // one record is ~75 bytes: the first write stays under the threshold,
    // the second crosses it
    let logger = LoggerBuilder::new(dir.path())
        .with_level(LogLevel::Debug)
        .with_color(false)
        .with_filename("rotate.log")
        .with_rotate_bytes(100)
        .build()
        .expect("logger");

    let _ = info!(logger, "first record").await;
    let _ = info!(logger, "second record").await;
    logger.wait().await;

    let archives = archives_in(dir.path());
    assert_eq!(archives.len(), 1, "one archive once the threshold is crossed");
    assert!(
        !dir.path().join("rotate.log").exists(),
        "rotation removes the active file"
    );

    let _ = info!(logger, "third record").await;
    logger.wait().await;

    let text = std::fs::read_to_string(dir.path().join("rotate.log")).expect("fresh log");
    assert_eq!(text.lines().count(), 1, "fresh file holds post-rotation records only");
    assert!(text.contains("third record"));
    assert!(!text.contains("first record"));
}

#[tokio::test]
async fn archive_round_trips_the_pre_rotation_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = LoggerBuilder::new(dir.path())
        .with_level(LogLevel::Debug)
        .with_color(false)
        .with_filename("trip.log")
        .with_rotate_bytes(100)
        .build()
        .expect("logger");

    let _ = info!(logger, "first record").await;
    logger.wait().await;
    let before = std::fs::read_to_string(dir.path().join("trip.log")).expect("active log");

    let _ = info!(logger, "second record").await;
    logger.wait().await;

    let archives = archives_in(dir.path());
    assert_eq!(archives.len(), 1);

    let (name, content) = extract_single_entry(&archives[0]);
    assert!(name.to_string_lossy().ends_with("trip.log"));
    assert!(
        content.starts_with(&before),
        "archive must begin with the pre-rotation bytes"
    );
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().last().expect("last line").contains("second record"));
}
