//! `keg edit` command
//!
//! # Usage
//! ```bash
//! keg edit 12              # By ID
//! keg edit last            # Most recently changed node
//! keg edit rust traits     # By title words, prompting if ambiguous
//! ```
//!
//! Saving an empty document deletes the node. When stdout is not a
//! terminal the command lists matching titles instead.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::utils::{self, OutputFormat};
use super::{editor, titles};
use crate::config::Config;
use crate::core::local::Local;
use crate::core::node::NodeStore;
use crate::core::target::Target;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Node ID, `last`, or words from the title
    #[arg(required = true, num_args = 1..)]
    pub target: Vec<String>,
}

pub fn run(args: EditArgs, config: &Config) -> Result<()> {
    if !utils::is_interactive() {
        return titles::print_matching(&args.target, OutputFormat::Includes, config);
    }

    let keg = utils::open_keg(config)?;
    let target = Target::parse(&args.target)?;
    let id = utils::resolve_target(&keg, &target)?;

    edit_node(&keg, id, config)
}

/// Open node `id` in the editor, then drop it if emptied, rebuild, and publish
pub fn edit_node(keg: &Local, id: u64, config: &Config) -> Result<()> {
    let store = NodeStore::open(&keg.path)?;
    if !store.exists(id) {
        bail!("content node ({}) does not exist in {:?}", id, keg.name);
    }

    editor::edit(&store.document_path(id), config)?;

    if store.remove_if_empty(id)? {
        println!("{} {}", "Removed empty node".yellow(), id);
    }

    utils::rebuild_and_publish(keg, config)?;
    Ok(())
}
