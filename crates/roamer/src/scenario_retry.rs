//! Scenario Retry
//!
//! Re-runs a failed scenario a bounded number of times. Unlike the stale-view
//! retry this works at whole-scenario granularity and keeps its own count.

use crate::result::RoamerResult;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default number of re-runs after the first failure
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// Outcome of a scenario run under a retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRun<T> {
    /// Value of the passing run
    pub value: T,
    /// Runs performed, including the passing one
    pub runs: usize,
}

/// Bounded re-run policy for failed scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRetry {
    max_retries: usize,
    #[serde(skip)]
    retries: usize,
}

impl Default for ScenarioRetry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl ScenarioRetry {
    /// Allow up to `max_retries` re-runs
    #[must_use]
    pub const fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            retries: 0,
        }
    }

    /// Maximum re-runs
    #[must_use]
    pub const fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Re-runs granted so far
    #[must_use]
    pub const fn retries(&self) -> usize {
        self.retries
    }

    /// Decide whether a finished run of `scenario` is re-run.
    ///
    /// Passing runs are never re-run; a failure is re-run while the budget
    /// lasts, and each grant is logged.
    pub fn should_retry(&mut self, scenario: &str, passed: bool) -> bool {
        if passed || self.retries >= self.max_retries {
            return false;
        }
        self.retries += 1;
        warn!(scenario, attempt = self.retries, "retrying failed scenario");
        true
    }

    /// Run `f` until it passes or the retry budget is spent.
    ///
    /// The error of the last run is returned when every run fails.
    pub fn run<T, F>(&mut self, scenario: &str, mut f: F) -> RoamerResult<ScenarioRun<T>>
    where
        F: FnMut(usize) -> RoamerResult<T>,
    {
        let mut runs = 0;
        loop {
            runs += 1;
            match f(runs) {
                Ok(value) => {
                    info!(scenario, runs, "scenario passed");
                    return Ok(ScenarioRun { value, runs });
                }
                Err(err) => {
                    warn!(scenario, runs, error = %err, "scenario failed");
                    if !self.should_retry(scenario, false) {
                        return Err(err);
                    }
                }
            }
        }
    }
}
