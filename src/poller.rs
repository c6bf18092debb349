//! Fixed-interval polling of a single condition
//!
//! A condition is checked once, then again every `interval` until it holds or
//! `floor(timeout / interval)` further checks have failed. Sleeps are
//! shortened by the time the check itself took, so slow checks do not stretch
//! the overall wait past `timeout`.

use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::conditions::Probe;

/// Terminal result of polling one condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    /// Every check failed; carries the reason of the final one
    TimedOut { last_error: String },
}

impl PollOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PollOutcome::Succeeded)
    }
}

/// Number of retries after the first check.
///
/// A zero interval means a single check.
pub fn max_iterations(interval: Duration, timeout: Duration) -> u32 {
    if interval.is_zero() {
        return 0;
    }
    u32::try_from(timeout.as_nanos() / interval.as_nanos()).unwrap_or(u32::MAX)
}

/// Poll `probe` until it holds or the timeout expires. Blocks the calling
/// thread.
pub fn poll<P: Probe + ?Sized>(probe: &P, interval: Duration, timeout: Duration) -> PollOutcome {
    let max = max_iterations(interval, timeout);
    let description = probe.describe();
    let mut iteration = 0;

    loop {
        let started = Instant::now();

        let last_error = match probe.check() {
            Ok(()) => {
                debug!(condition = %description, checks = iteration + 1, "Check succeeded");
                return PollOutcome::Succeeded;
            }
            Err(e) => {
                debug!(condition = %description, error = %e, "Check failed");
                e.to_string()
            }
        };

        if iteration >= max {
            debug!(condition = %description, checks = iteration + 1, "Timed out");
            return PollOutcome::TimedOut { last_error };
        }

        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }

        iteration += 1;
    }
}
