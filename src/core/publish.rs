//! Publish - Post-mutation hook
//!
//! Runs after every rebuild that followed a node change. The git
//! publisher commits the keg when it is a repository and does nothing
//! otherwise. It never pushes.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use super::error::{KegError, Result};
use crate::config::PublishConfig;

pub trait Publisher {
    fn publish(&self, root: &Path) -> Result<()>;
}

/// Publisher that does nothing
#[derive(Debug, Default)]
pub struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn publish(&self, root: &Path) -> Result<()> {
        debug!(root = %root.display(), "publishing disabled");
        Ok(())
    }
}

/// Stages everything and commits it with a fixed message
#[derive(Debug, Clone)]
pub struct GitPublisher {
    message: String,
}

impl GitPublisher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn git(&self, root: &Path, args: &[&str]) -> Result<std::process::Output> {
        Command::new("git")
            .arg("-C")
            .arg(root)
            .args(args)
            .output()
            .map_err(|e| KegError::Publish(format!("unable to run git: {}", e)))
    }
}

impl Publisher for GitPublisher {
    fn publish(&self, root: &Path) -> Result<()> {
        if !root.join(".git").exists() {
            debug!(root = %root.display(), "not a git repository, skipping publish");
            return Ok(());
        }

        let add = self.git(root, &["add", "-A", "."])?;
        if !add.status.success() {
            return Err(KegError::Publish(
                String::from_utf8_lossy(&add.stderr).trim().to_string(),
            ));
        }

        let staged = self.git(root, &["diff", "--cached", "--quiet"])?;
        if staged.status.success() {
            debug!("nothing to commit");
            return Ok(());
        }

        let commit = self.git(root, &["commit", "-q", "-m", self.message.as_str()])?;
        if !commit.status.success() {
            return Err(KegError::Publish(
                String::from_utf8_lossy(&commit.stderr).trim().to_string(),
            ));
        }

        info!(root = %root.display(), "committed keg changes");
        Ok(())
    }
}

/// Publisher selected by the config
pub fn from_config(config: &PublishConfig) -> Box<dyn Publisher> {
    if config.enabled {
        Box::new(GitPublisher::new(config.message.clone()))
    } else {
        Box::new(NoopPublisher)
    }
}
