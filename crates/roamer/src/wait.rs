//! Wait Mechanisms
//!
//! Deadline-bounded polling used for visibility and clickability waits.
//! All waits are blocking: a call returns once its condition holds or fails
//! with [`RoamerError::Timeout`].

use crate::clock::Clock;
use crate::result::{RoamerError, RoamerResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// DEADLINE
// =============================================================================

/// A wall-clock bound shared by every step of one operation
#[derive(Debug, Clone, Copy)]
pub struct Deadline<'a> {
    clock: &'a dyn Clock,
    started: Duration,
    timeout: Duration,
}

impl<'a> Deadline<'a> {
    /// Start a deadline now
    #[must_use]
    pub fn new(clock: &'a dyn Clock, timeout: Duration) -> Self {
        Self {
            clock,
            started: clock.now(),
            timeout,
        }
    }

    /// Time spent since the deadline started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started)
    }

    /// Whether the deadline has passed
    #[must_use]
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.timeout
    }

    /// Configured timeout in milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// The error to surface when this deadline elapses
    #[must_use]
    pub fn timeout_error(&self) -> RoamerError {
        RoamerError::Timeout {
            ms: self.timeout_ms(),
        }
    }

    /// Clock the deadline reads from
    #[must_use]
    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of times the condition was evaluated
    pub checks: usize,
}

// =============================================================================
// WAITING
// =============================================================================

/// Poll `condition` until it holds or `deadline` elapses.
///
/// Errors from the condition end the wait immediately, stale views included,
/// so the caller can re-query the element instead of polling a dead handle.
pub fn wait_for<F>(
    deadline: &Deadline<'_>,
    poll_interval: Duration,
    mut condition: F,
) -> RoamerResult<WaitResult>
where
    F: FnMut() -> RoamerResult<bool>,
{
    let mut checks = 0;
    loop {
        checks += 1;
        match condition() {
            Ok(true) => {
                return Ok(WaitResult {
                    elapsed: deadline.elapsed(),
                    checks,
                })
            }
            Ok(false) => {}
            Err(err) => return Err(err),
        }

        if deadline.expired() {
            return Err(deadline.timeout_error());
        }
        deadline.clock().sleep(poll_interval);
    }
}

/// Wait for a condition with its own deadline
pub fn wait_until<F>(
    clock: &dyn Clock,
    options: &WaitOptions,
    condition: F,
) -> RoamerResult<WaitResult>
where
    F: FnMut() -> RoamerResult<bool>,
{
    let deadline = Deadline::new(clock, options.timeout());
    wait_for(&deadline, options.poll_interval(), condition)
}
