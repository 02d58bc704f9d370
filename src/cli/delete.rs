//! `keg delete` command
//!
//! # Usage
//! ```bash
//! keg delete 12
//! keg rm last
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils;
use crate::config::Config;
use crate::core::node::NodeStore;
use crate::core::target::Target;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Node ID or `last`
    pub target: String,
}

pub fn run(args: DeleteArgs, config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;
    let target = Target::parse_strict(&args.target)?;
    let id = utils::resolve_target(&keg, &target)?;

    NodeStore::open(&keg.path)?.delete_node(id)?;
    utils::rebuild_and_publish(&keg, config)?;

    println!("{} {}", "Deleted node".yellow(), id);
    Ok(())
}
