//! `keg create` command
//!
//! # Usage
//! ```bash
//! keg create           # Blank node
//! keg create sample    # Node prefilled with the markup sample
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{edit, utils};
use crate::config::Config;
use crate::core::node::NodeStore;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Start from the markup sample document
    #[arg(value_parser = ["sample"])]
    pub template: Option<String>,
}

pub fn run(args: CreateArgs, config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;
    let store = NodeStore::open(&keg.path)?;

    let id = store.make_node()?;
    if args.template.is_some() {
        store.write_sample(id)?;
    }

    edit::edit_node(&keg, id, config)?;

    if store.exists(id) {
        println!("{} {}", "Created node".green(), id);
    }
    Ok(())
}
