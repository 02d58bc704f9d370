//! Error - Core error kinds
//!
//! Builder and store failures propagate to the command and abort it.
//! Per-node read failures and malformed index lines never surface here:
//! they are skipped where they occur.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KegError {
    /// Missing keg root, index file, or node document
    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// Filesystem read/write failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Index text that yielded no parseable entry
    #[error("unable to parse dex: {input:?}")]
    Parse { input: String },

    /// A query that required a node found none
    #[error("no node with title matching {0:?}")]
    NoMatch(String),

    /// Node argument that is neither an ID, `last`, nor title text
    #[error("invalid node reference: {0:?}")]
    InvalidTarget(String),

    /// Every node ID up to `u64::MAX` is taken
    #[error("no node IDs left")]
    IdsExhausted,

    /// Interactive choice prompt failed
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Editor could not be launched or exited non-zero
    #[error("editor failed: {0}")]
    Editor(String),

    /// Post-mutation publish hook failed
    #[error("publish failed: {0}")]
    Publish(String),
}

impl KegError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        KegError::NotFound {
            what,
            path: path.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KegError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = KegError> = std::result::Result<T, E>;
