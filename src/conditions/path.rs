use std::fs;
use std::path::{Path, PathBuf};

use super::{CheckError, Probe};

/// Holds once the path can be stat'ed.
///
/// Any stat error counts as failure, including permission denied. The
/// underlying error is passed through as the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCondition {
    path: PathBuf,
}

impl PathCondition {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Probe for PathCondition {
    fn describe(&self) -> String {
        format!("PathWait:{}", self.path.display())
    }

    fn check(&self) -> Result<(), CheckError> {
        fs::metadata(&self.path)
            .map(|_| ())
            .map_err(|source| CheckError::Stat {
                path: self.path.clone(),
                source,
            })
    }
}
