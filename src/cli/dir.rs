//! `keg dir` command
//!
//! # Usage
//! ```bash
//! keg dir                 # Keg directory
//! keg dir rust traits     # Directory of the chosen node
//! cd $(keg dir last)
//! ```

use anyhow::Result;
use clap::Args;

use super::utils;
use crate::config::Config;
use crate::core::node::NodeStore;
use crate::core::target::Target;

#[derive(Args, Debug)]
pub struct DirArgs {
    /// Node ID, `last`, or title words
    pub target: Vec<String>,
}

pub fn run(args: DirArgs, config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;

    if args.target.is_empty() {
        println!("{}", keg.path.display());
        return Ok(());
    }

    let target = Target::parse(&args.target)?;
    let id = utils::resolve_target(&keg, &target)?;

    println!("{}", NodeStore::open(&keg.path)?.node_dir(id).display());
    Ok(())
}
