//! Size-triggered archiving of the active log file.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use chrono::Local;
use flate2::Compression;
use flate2::write::GzEncoder;

/// Archive names carry second precision.
pub const ARCHIVE_TS_FORMAT: &str = "%Y%m%d%H%M%S";

/// Streams the active log into `<dir>/<YYYYMMDDHHMMSS>.tar.gz` as a single
/// entry named after the log path, then deletes the active file so the next
/// append starts fresh. Best-effort: the writer loop reports a failure
/// through its diagnostic sink and keeps going.
pub fn archive(log_path: &Path) -> io::Result<()> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let stamp = Local::now().format(ARCHIVE_TS_FORMAT).to_string();

    // second-precision names collide under rapid rotation; suffix a counter
    // instead of truncating the earlier archive
    let mut target = dir.join(format!("{stamp}.tar.gz"));
    let mut n = 1u32;
    while target.exists() {
        target = dir.join(format!("{stamp}-{n}.tar.gz"));
        n += 1;
    }

    let out = File::create(&target)?;
    let encoder = GzEncoder::new(out, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    // tar entry names must be relative; keep the rest of the original path
    let entry_name = log_path.strip_prefix("/").unwrap_or(log_path);
    builder.append_path_with_name(log_path, entry_name)?;
    builder.into_inner()?.finish()?;

    fs::remove_file(log_path)?;
    Ok(())
}
