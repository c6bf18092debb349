pub mod aggregator;
pub mod conditions;
pub mod config;
pub mod logging;
pub mod poller;
pub mod process;
pub mod validation;

pub use aggregator::{Aggregator, Verdict, WaitError};
pub use conditions::{CheckError, Condition, Probe};
pub use config::{ConfigError, Policy, RunConfig};
pub use poller::{poll, PollOutcome};
