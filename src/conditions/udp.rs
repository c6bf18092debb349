use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use super::{CheckError, Probe};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Datagram sent to the target on every check
pub const PROBE_PAYLOAD: &[u8] = b"HELLO\r\n\r\n";

/// Holds once `host:port` answers a probe datagram with at least one byte.
///
/// UDP has no handshake, so this only proves that the remote host sent
/// something back. The content of the reply is not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpCondition {
    host_port: String,
    read_timeout: Duration,
}

impl UdpCondition {
    pub fn new(host_port: impl Into<String>) -> Self {
        Self {
            host_port: host_port.into(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn host_port(&self) -> &str {
        &self.host_port
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    fn resolve(&self) -> Result<SocketAddr, CheckError> {
        self.host_port
            .to_socket_addrs()
            .map_err(|source| CheckError::Resolve {
                target: self.host_port.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| CheckError::NoAddress(self.host_port.clone()))
    }

    fn dial_error(&self, source: std::io::Error) -> CheckError {
        CheckError::Connect {
            target: self.host_port.clone(),
            source,
        }
    }
}

impl Probe for UdpCondition {
    fn describe(&self) -> String {
        format!("UDPWait:{}", self.host_port)
    }

    fn check(&self) -> Result<(), CheckError> {
        let addr = self.resolve()?;
        let local = if addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };

        let socket = UdpSocket::bind(local).map_err(|e| self.dial_error(e))?;
        socket.connect(addr).map_err(|e| self.dial_error(e))?;
        socket
            .set_read_timeout(Some(self.read_timeout))
            .map_err(|e| self.dial_error(e))?;
        socket.send(PROBE_PAYLOAD).map_err(|e| self.dial_error(e))?;

        let mut buf = [0u8; 8];
        let read = socket.recv(&mut buf).map_err(|source| CheckError::Read {
            target: self.host_port.clone(),
            source,
        })?;

        if read == 0 {
            return Err(CheckError::EmptyReply(self.host_port.clone()));
        }
        Ok(())
    }
}
