//! Readiness conditions
//!
//! A condition is something that can be checked once and either holds or
//! fails with a reason. The poller calls [`Probe::check`] repeatedly until it
//! holds or the timeout expires.
//!
//! The set of condition kinds is closed: [`Condition`] enumerates them and
//! dispatches to the concrete type.

mod http;
mod path;
mod tcp;
mod udp;

pub use http::{
    normalize_url, HttpCondition, DEFAULT_ACCEPTED_CODES, DEFAULT_REQUEST_TIMEOUT, MAX_BODY_BYTES,
};
pub use path::PathCondition;
pub use tcp::{TcpCondition, DEFAULT_CONNECT_TIMEOUT};
pub use udp::{UdpCondition, DEFAULT_READ_TIMEOUT, PROBE_PAYLOAD};

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single check did not succeed
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot resolve {target}: {source}")]
    Resolve {
        target: String,
        source: std::io::Error,
    },

    #[error("no addresses found for {0}")]
    NoAddress(String),

    #[error("dial {target}: {source}")]
    Connect {
        target: String,
        source: std::io::Error,
    },

    #[error("read {target}: {source}")]
    Read {
        target: String,
        source: std::io::Error,
    },

    #[error("empty reply from {0}")]
    EmptyReply(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("received status {0} is not accepted")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(std::io::Error),

    #[error("response body does not match '{0}'")]
    ContentMismatch(String),
}

/// Something that can be checked for readiness.
pub trait Probe {
    /// Stable identifier used in logs, e.g. `TCPWait:db:5432`.
    fn describe(&self) -> String;

    /// Run one check. No side effects beyond the I/O the check needs.
    fn check(&self) -> Result<(), CheckError>;
}

/// A single readiness condition
#[derive(Debug, Clone)]
pub enum Condition {
    Path(PathCondition),
    Http(HttpCondition),
    Tcp(TcpCondition),
    Udp(UdpCondition),
}

impl Probe for Condition {
    fn describe(&self) -> String {
        match self {
            Condition::Path(c) => c.describe(),
            Condition::Http(c) => c.describe(),
            Condition::Tcp(c) => c.describe(),
            Condition::Udp(c) => c.describe(),
        }
    }

    fn check(&self) -> Result<(), CheckError> {
        match self {
            Condition::Path(c) => c.check(),
            Condition::Http(c) => c.check(),
            Condition::Tcp(c) => c.check(),
            Condition::Udp(c) => c.check(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<PathCondition> for Condition {
    fn from(c: PathCondition) -> Self {
        Condition::Path(c)
    }
}

impl From<HttpCondition> for Condition {
    fn from(c: HttpCondition) -> Self {
        Condition::Http(c)
    }
}

impl From<TcpCondition> for Condition {
    fn from(c: TcpCondition) -> Self {
        Condition::Tcp(c)
    }
}

impl From<UdpCondition> for Condition {
    fn from(c: UdpCondition) -> Self {
        Condition::Udp(c)
    }
}
