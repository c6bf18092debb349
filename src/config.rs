//! Run configuration
//!
//! Interval, timeout and policy are validated once, before any condition is
//! polled. A [`RunConfig`] built through [`RunConfig::new`] always satisfies
//! `MIN_INTERVAL <= interval < timeout` with `timeout` a whole multiple of
//! `interval`, so the number of checks per condition is exact.

use humantime::{format_duration, FormattedDuration};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Bounds how often a condition can be checked
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

fn human(duration: &Duration) -> FormattedDuration {
    format_duration(*duration)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--timeout ({}) has to be bigger than --interval ({})", human(.timeout), human(.interval))]
    IntervalNotBelowTimeout {
        interval: Duration,
        timeout: Duration,
    },

    #[error("--interval ({}) has to divide --timeout ({}) evenly", human(.interval), human(.timeout))]
    UnevenTimeout {
        interval: Duration,
        timeout: Duration,
    },

    #[error("--interval cannot be smaller than {} (got {})", human(&MIN_INTERVAL), human(.0))]
    IntervalTooShort(Duration),

    #[error("cannot specify both --and and --or")]
    ConflictingPolicy,

    #[error("{0} is not a valid HTTP status")]
    InvalidStatusCode(String),

    #[error("start {start} is bigger than end {end}")]
    InvalidStatusRange { start: u16, end: u16 },

    #[error("invalid HTTP check '{target}': {reason}")]
    InvalidHttpTarget { target: String, reason: String },

    #[error("invalid content pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("cannot specify --http-codes when no --http checks are defined")]
    HttpCodesWithoutHttp,

    #[error("failed to create HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

/// How poll outcomes are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Every condition must hold
    #[default]
    And,
    /// One condition holding is enough
    Or,
}

impl Policy {
    /// Resolve the `--and` / `--or` flags. Neither means AND.
    pub fn from_flags(and: bool, or: bool) -> Result<Self, ConfigError> {
        match (and, or) {
            (true, true) => Err(ConfigError::ConflictingPolicy),
            (_, true) => Ok(Policy::Or),
            _ => Ok(Policy::And),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::And => write!(f, "and"),
            Policy::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub interval: Duration,
    pub timeout: Duration,
    pub policy: Policy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            policy: Policy::default(),
        }
    }
}

impl RunConfig {
    pub fn new(interval: Duration, timeout: Duration, policy: Policy) -> Result<Self, ConfigError> {
        let config = Self {
            interval,
            timeout,
            policy,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval >= self.timeout {
            return Err(ConfigError::IntervalNotBelowTimeout {
                interval: self.interval,
                timeout: self.timeout,
            });
        }
        if self.interval < MIN_INTERVAL {
            return Err(ConfigError::IntervalTooShort(self.interval));
        }
        if self.timeout.as_nanos() % self.interval.as_nanos() != 0 {
            return Err(ConfigError::UnevenTimeout {
                interval: self.interval,
                timeout: self.timeout,
            });
        }
        Ok(())
    }

    /// Checks performed for a condition that never holds
    pub fn max_checks(&self) -> u32 {
        crate::poller::max_iterations(self.interval, self.timeout).saturating_add(1)
    }
}
