//! `keg dex` command
//!
//! # Usage
//! ```bash
//! keg dex update    # Rebuild dex/latest.md and dex/nodes.tsv
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::utils;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct DexArgs {
    #[command(subcommand)]
    pub command: DexCommands,
}

#[derive(Subcommand, Debug)]
pub enum DexCommands {
    /// Rebuild dex/latest.md and dex/nodes.tsv from the nodes
    Update,
}

pub fn run(args: DexArgs, config: &Config) -> Result<()> {
    match args.command {
        DexCommands::Update => {
            let keg = utils::open_keg(config)?;
            let dex = utils::rebuild(&keg)?;
            println!("{} ({} nodes)", "Updated dex".green(), dex.len());
            Ok(())
        }
    }
}
