//! Process replacement
//!
//! Once every condition is satisfied, the target command replaces the current
//! process. `argv[0]` is resolved through `PATH` but passed to the new program
//! as given, and the environment is inherited unchanged.

use nix::errno::Errno;
use nix::unistd::execv;
use std::convert::Infallible;
use std::ffi::{CString, NulError};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no command given")]
    Empty,

    #[error("unable to find {command}: {source}")]
    NotFound {
        command: String,
        source: which::Error,
    },

    #[error("argument contains a NUL byte: {0}")]
    Nul(#[from] NulError),

    #[error("unable to start {}: {source}", .program.display())]
    Exec { program: PathBuf, source: Errno },
}

/// Resolve a command name to an executable path using `PATH`.
///
/// Names containing a slash are taken as paths and only checked for
/// executability.
pub fn resolve(command: &str) -> Result<PathBuf, LaunchError> {
    which::which(command).map_err(|source| LaunchError::NotFound {
        command: command.to_string(),
        source,
    })
}

/// Replace the current process with `args`, keeping the environment.
///
/// Only returns on failure.
pub fn exec_with_env(args: &[String]) -> Result<Infallible, LaunchError> {
    let (command, rest) = args.split_first().ok_or(LaunchError::Empty)?;
    let program = resolve(command)?;
    debug!(program = %program.display(), args = ?rest, "Starting command");

    let path = CString::new(program.as_os_str().as_bytes())?;
    let argv = args
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;

    execv(&path, &argv).map_err(|source| LaunchError::Exec { program, source })
}
