//! Screenshots and report-directory cleanup.

use crate::result::RoamerResult;
use crate::session::UiSession;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp suffix format for screenshot files (`dd-MM-yy HH-mm-ss`)
pub const SCREENSHOT_TIMESTAMP: &str = "%d-%m-%y %H-%M-%S";

/// Screenshot path for `name` taken at `at`
#[must_use]
pub fn screenshot_path(dir: &Path, name: &str, at: NaiveDateTime) -> PathBuf {
    dir.join(format!("{name}_{}.png", at.format(SCREENSHOT_TIMESTAMP)))
}

/// Capture the session viewport into `dir`, returning the written path
pub fn capture_screenshot<S>(session: &mut S, dir: impl AsRef<Path>, name: &str) -> RoamerResult<PathBuf>
where
    S: UiSession + ?Sized,
{
    let dir = dir.as_ref();
    let bytes = session.screenshot()?;
    fs::create_dir_all(dir)?;
    let path = screenshot_path(dir, name, Local::now().naive_local());
    fs::write(&path, bytes)?;
    info!(path = %path.display(), "screenshot saved");
    Ok(path)
}

/// Remove report directories recursively; missing ones are skipped.
///
/// Returns the directories that were removed.
pub fn clean_report_dirs<P: AsRef<Path>>(paths: &[P]) -> RoamerResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "report directory absent");
            continue;
        }
        fs::remove_dir_all(path)?;
        info!(path = %path.display(), "report directory removed");
        removed.push(path.to_path_buf());
    }
    Ok(removed)
}
