//! Stale-view retry.
//!
//! Reads over a live UI list can be invalidated mid-read when the list is
//! re-rendered. [`retry_on_stale`] re-issues such reads with no backoff until
//! one succeeds; the only bound is the caller's [`Deadline`].

use crate::result::RoamerResult;
use crate::wait::Deadline;
use tracing::{debug, warn};

/// Re-run `read` while it reports a stale view.
///
/// Any non-stale outcome (success or another error) is returned as-is.
/// Once the deadline has elapsed a stale read becomes a `Timeout`.
pub fn retry_on_stale<T, F>(deadline: &Deadline<'_>, what: &str, mut read: F) -> RoamerResult<T>
where
    F: FnMut() -> RoamerResult<T>,
{
    let mut attempts: usize = 0;
    loop {
        attempts += 1;
        match read() {
            Err(err) if err.is_stale() => {
                if deadline.expired() {
                    warn!(what, attempts, "stale view persisted past deadline");
                    return Err(deadline.timeout_error());
                }
                debug!(what, attempts, "stale view, re-reading");
            }
            outcome => return outcome,
        }
    }
}
