//! CLI utility functions
//!
//! Helpers shared across commands:
//! - Keg discovery (open_keg)
//! - Dex reading and the rebuild-then-publish sequence
//! - Output format selection
//! - Interactive disambiguation

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use crate::config::Config;
use crate::core::dex::{Chooser, Dex, RenderMode};
use crate::core::error::KegError;
use crate::core::local::{self, Local};
use crate::core::node::Node;
use crate::core::store::DexStore;
use crate::core::target::Target;
use crate::core::{builder, publish};

/// How a dex is printed
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty on a terminal, includes when piped
    #[default]
    Auto,
    /// `ID  date  title` listing
    Pretty,
    /// `* [title](../ID)` lines
    Includes,
    /// JSON array
    Json,
}

/// Resolve the keg this invocation works on
pub fn open_keg(config: &Config) -> Result<Local> {
    let env = std::env::var(local::CURRENT_ENV).ok();
    let cwd = std::env::current_dir()?;
    let keg = local::resolve_active(env.as_deref(), &cwd, config)?;
    debug!(name = %keg.name, path = %keg.path.display(), "resolved keg");
    Ok(keg)
}

/// Read the persisted dex of `keg`
pub fn read_dex(keg: &Local) -> Result<Dex> {
    DexStore::new(&keg.path)
        .read()
        .with_context(|| format!("Unable to read dex of {:?}. Run 'keg dex update'.", keg.name))
}

/// Resolve a node argument to an ID, reading the dex only when needed
pub fn resolve_target(keg: &Local, target: &Target) -> Result<u64> {
    let dex = if target.needs_dex() {
        read_dex(keg)?
    } else {
        Dex::default()
    };
    Ok(target.resolve(&dex, &mut PromptChooser)?)
}

/// Rebuild the dex from the node tree and write both artifacts
pub fn rebuild(keg: &Local) -> Result<Dex> {
    let dex = builder::build(&keg.path)?;
    DexStore::new(&keg.path).write(&dex)?;
    Ok(dex)
}

/// Rebuild, write, and publish; required after any node change
pub fn rebuild_and_publish(keg: &Local, config: &Config) -> Result<Dex> {
    let dex = rebuild(keg)?;
    publish::from_config(&config.publish).publish(&keg.path)?;
    Ok(dex)
}

/// Whether stdout is attached to a terminal
pub fn is_interactive() -> bool {
    console::Term::stdout().is_term()
}

/// Print `dex` in the requested format
pub fn print_dex(dex: &Dex, format: OutputFormat) -> Result<()> {
    let mode = match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(dex)?);
            return Ok(());
        }
        OutputFormat::Pretty => RenderMode::Pretty,
        OutputFormat::Includes => RenderMode::Includes,
        OutputFormat::Auto if is_interactive() => RenderMode::Pretty,
        OutputFormat::Auto => RenderMode::Includes,
    };
    print!("{}", dex.render(mode));
    Ok(())
}

/// Numbered-choice prompt on the terminal
#[derive(Debug, Default)]
pub struct PromptChooser;

impl Chooser for PromptChooser {
    fn choose(&mut self, candidates: &[Node]) -> Result<Option<usize>, KegError> {
        let items: Vec<String> = candidates
            .iter()
            .map(|n| format!("{:>6}  {}", n.id, n.title))
            .collect();

        dialoguer::Select::new()
            .with_prompt("Choose a node (esc to abort)")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| KegError::Prompt(e.to_string()))
    }
}
