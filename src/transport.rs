//! Byte-stream connections to a remote terminal.
use crate::error::{Error, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::net::TcpStream;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Where the terminal lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteTarget {
    /// `tcp://host:port`, e.g. a terminal server or emulator.
    Tcp(String),
    /// A serial device or plain file, opened for appending.
    Device(PathBuf),
}

impl FromStr for RemoteTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.strip_prefix("tcp://") {
            Some(addr) if !addr.is_empty() => Ok(RemoteTarget::Tcp(addr.to_string())),
            Some(_) => Err(Error::RemoteTarget(s.to_string())),
            None if s.is_empty() => Err(Error::RemoteTarget(s.to_string())),
            None => Ok(RemoteTarget::Device(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteTarget::Tcp(addr) => write!(f, "tcp://{}", addr),
            RemoteTarget::Device(path) => write!(f, "{}", path.display()),
        }
    }
}

impl RemoteTarget {
    /// Open the byte stream.
    ///
    /// Writes block until the peer accepts them.  `write_timeout` bounds
    /// that wait for TCP targets; device targets always block.
    pub fn connect(&self, write_timeout: Option<Duration>) -> Result<Box<dyn Write + Send>> {
        let writer: Box<dyn Write + Send> = match self {
            RemoteTarget::Tcp(addr) => {
                let stream = TcpStream::connect(addr.as_str())?;
                stream.set_nodelay(true)?;
                stream.set_write_timeout(write_timeout)?;
                Box::new(stream)
            }
            RemoteTarget::Device(path) => {
                Box::new(OpenOptions::new().create(true).append(true).open(path)?)
            }
        };
        info!(remote = %self, "remote terminal connected");
        Ok(writer)
    }
}
