use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::{CheckError, Probe};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Holds once `host:port` accepts a TCP connection.
///
/// Every resolved address is tried in order; the connection is closed as soon
/// as it is established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpCondition {
    host_port: String,
    connect_timeout: Duration,
}

impl TcpCondition {
    pub fn new(host_port: impl Into<String>) -> Self {
        Self {
            host_port: host_port.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn host_port(&self) -> &str {
        &self.host_port
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Probe for TcpCondition {
    fn describe(&self) -> String {
        format!("TCPWait:{}", self.host_port)
    }

    fn check(&self) -> Result<(), CheckError> {
        let addrs = self
            .host_port
            .to_socket_addrs()
            .map_err(|source| CheckError::Resolve {
                target: self.host_port.clone(),
                source,
            })?;

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    let _ = stream.shutdown(Shutdown::Both);
                    return Ok(());
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(match last_error {
            Some(source) => CheckError::Connect {
                target: self.host_port.clone(),
                source,
            },
            None => CheckError::NoAddress(self.host_port.clone()),
        })
    }
}
