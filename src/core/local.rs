//! Local - Which keg a command operates on
//!
//! Resolution order:
//! 1. `KEG_CURRENT` naming a keg registered in the config
//! 2. The working directory, if it holds a `keg` info file
//! 3. The `current` config setting
//!
//! Setting `current` pins a default keg; changing into another keg's
//! directory or exporting `KEG_CURRENT` overrides it for a while.

use std::path::{Path, PathBuf};

use super::error::{KegError, Result};
use super::node::INFO_FILE;
use crate::config::Config;

/// Environment variable naming the active keg
pub const CURRENT_ENV: &str = "KEG_CURRENT";

/// A resolved keg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    pub name: String,
    pub path: PathBuf,
}

/// Resolve the active keg from the environment, working directory and config
pub fn resolve_active(env_current: Option<&str>, cwd: &Path, config: &Config) -> Result<Local> {
    if let Some(name) = env_current.filter(|n| !n.is_empty()) {
        if let Some(path) = config.keg_path(name) {
            return Ok(Local {
                name: name.to_string(),
                path,
            });
        }
    }

    if cwd.join(INFO_FILE).is_file() {
        let name = cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(Local {
            name,
            path: cwd.to_path_buf(),
        });
    }

    if let Some(name) = config.current.as_deref() {
        if let Some(path) = config.keg_path(name) {
            return Ok(Local {
                name: name.to_string(),
                path,
            });
        }
    }

    Err(KegError::not_found(
        "keg (checked KEG_CURRENT, working directory, config `current`)",
        cwd,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> Config {
        let mut config = Config::default();
        config.kegs.insert("env".into(), "/kegs/env".into());
        config.kegs.insert("pinned".into(), "/kegs/pinned".into());
        config.current = Some("pinned".into());
        config
    }

    #[test]
    fn test_env_wins() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join(INFO_FILE), "").unwrap();

        let local = resolve_active(Some("env"), cwd.path(), &config()).unwrap();

        assert_eq!(local.name, "env");
        assert_eq!(local.path, PathBuf::from("/kegs/env"));
    }

    #[test]
    fn test_unknown_env_falls_through_to_cwd() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join(INFO_FILE), "").unwrap();

        let local = resolve_active(Some("nope"), cwd.path(), &config()).unwrap();

        assert_eq!(local.path, cwd.path());
        assert_eq!(
            local.name,
            cwd.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_config_current_last() {
        let cwd = TempDir::new().unwrap();
        let local = resolve_active(None, cwd.path(), &config()).unwrap();
        assert_eq!(local.name, "pinned");
    }

    #[test]
    fn test_nothing_found() {
        let cwd = TempDir::new().unwrap();
        let err = resolve_active(Some(""), cwd.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, KegError::NotFound { .. }));
    }
}
