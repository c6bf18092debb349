//! Fan-in of poll outcomes
//!
//! [`Aggregator::run`] starts one polling thread per condition and reads their
//! outcomes from a single channel. [`Aggregator::record`] is the reduction:
//! it turns outcomes into a verdict under the configured [`Policy`] and stops
//! as soon as the verdict can no longer change.
//!
//! Pollers still running when the verdict is reached are left alone. Their
//! results go to a dropped receiver and are discarded.

use std::sync::mpsc;
use std::thread;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::conditions::Probe;
use crate::config::{Policy, RunConfig};
use crate::poller::{poll, PollOutcome};

/// Terminal decision of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Succeeded,
    Failed,
}

impl Verdict {
    /// Map a failed verdict to the error reported for `policy`.
    pub fn into_result(self, policy: Policy) -> Result<(), WaitError> {
        match (self, policy) {
            (Verdict::Succeeded, _) => Ok(()),
            (Verdict::Failed, Policy::Or) => Err(WaitError::AllTimedOut),
            (Verdict::Failed, Policy::And) => Err(WaitError::RequiredTimedOut),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    #[error("all conditions timed out")]
    AllTimedOut,

    #[error("a required condition timed out")]
    RequiredTimedOut,
}

/// One poller's outcome, tagged with the condition it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub condition: String,
    pub outcome: PollOutcome,
}

impl Report {
    /// A poller that never started counts as timed out
    fn spawn_failed(condition: String, err: &std::io::Error) -> Self {
        Self {
            condition,
            outcome: PollOutcome::TimedOut {
                last_error: format!("failed to start poller: {err}"),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    policy: Policy,
    expected: usize,
    succeeded: usize,
    timed_out: usize,
    verdict: Option<Verdict>,
}

impl Aggregator {
    pub fn new(policy: Policy, expected: usize) -> Self {
        // With nothing to wait for, AND holds vacuously and OR has nothing
        // that could succeed
        let verdict = match (expected, policy) {
            (0, Policy::And) => Some(Verdict::Succeeded),
            (0, Policy::Or) => Some(Verdict::Failed),
            _ => None,
        };

        Self {
            policy,
            expected,
            succeeded: 0,
            timed_out: 0,
            verdict,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Fold one outcome in. Returns the verdict once reached; outcomes
    /// recorded after that are ignored.
    pub fn record(&mut self, outcome: &PollOutcome) -> Option<Verdict> {
        if self.verdict.is_some() {
            return self.verdict;
        }

        if outcome.succeeded() {
            self.succeeded += 1;
        } else {
            self.timed_out += 1;
        }

        self.verdict = match self.policy {
            Policy::Or if self.succeeded > 0 => Some(Verdict::Succeeded),
            Policy::Or if self.timed_out >= self.expected => Some(Verdict::Failed),
            Policy::And if self.timed_out > 0 => Some(Verdict::Failed),
            Policy::And if self.succeeded >= self.expected => Some(Verdict::Succeeded),
            _ => None,
        };
        self.verdict
    }

    /// Poll every condition concurrently and reduce the outcomes.
    pub fn run<P>(conditions: Vec<P>, config: &RunConfig) -> Verdict
    where
        P: Probe + Send + 'static,
    {
        let mut aggregator = Aggregator::new(config.policy, conditions.len());
        if let Some(verdict) = aggregator.verdict() {
            return verdict;
        }

        match config.policy {
            Policy::And => debug!("Waiting for all conditions to succeed"),
            Policy::Or => debug!("Waiting for one condition to succeed"),
        }

        let (tx, rx) = mpsc::channel();

        // All pollers start before any result is read
        for condition in conditions {
            let description = condition.describe();
            let worker_tx = tx.clone();
            let (interval, timeout) = (config.interval, config.timeout);

            let spawned = thread::Builder::new()
                .name(format!("poll {description}"))
                .spawn(move || {
                    let outcome = poll(&condition, interval, timeout);
                    let _ = worker_tx.send(Report {
                        condition: condition.describe(),
                        outcome,
                    });
                });

            // The closure and its sender are gone; report on the outer one
            if let Err(e) = spawned {
                let _ = tx.send(Report::spawn_failed(description, &e));
            }
        }
        drop(tx);

        for report in rx.iter() {
            log_report(&report);
            if let Some(verdict) = aggregator.record(&report.outcome) {
                return verdict;
            }
        }

        // Every sender is gone without a verdict, which only happens if a
        // poller thread panicked before reporting
        warn!("Pollers exited without reporting");
        Verdict::Failed
    }
}

fn log_report(report: &Report) {
    match &report.outcome {
        PollOutcome::Succeeded => info!(condition = %report.condition, "Condition satisfied"),
        PollOutcome::TimedOut { last_error } => warn!(
            condition = %report.condition,
            error = %last_error,
            "Condition timed out"
        ),
    }
}
