//! Editor invocation
//!
//! The editor command goes through the shell the way git runs
//! `core.editor`, so values like `code --wait` work unchanged.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::Config;
use crate::core::error::KegError;

/// Editor command: config, then `$VISUAL`, then `$EDITOR`, then `vi`
pub fn editor_command(config: &Config) -> String {
    config
        .editor
        .command
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| std::env::var("VISUAL").ok().filter(|c| !c.trim().is_empty()))
        .or_else(|| std::env::var("EDITOR").ok().filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `path` in the editor and wait for it to exit
pub fn edit(path: &Path, config: &Config) -> Result<(), KegError> {
    let editor = editor_command(config);
    debug!(%editor, path = %path.display(), "opening editor");

    let status = shell(&editor, path)
        .status()
        .map_err(|e| KegError::Editor(format!("unable to run {:?}: {}", editor, e)))?;

    if !status.success() {
        return Err(KegError::Editor(format!("{:?} exited with {}", editor, status)));
    }
    Ok(())
}

#[cfg(not(windows))]
fn shell(editor: &str, path: &Path) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(format!("{} \"$@\"", editor))
        .arg(editor)
        .arg(path);
    cmd
}

#[cfg(windows)]
fn shell(editor: &str, path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(editor).arg(path);
    cmd
}
