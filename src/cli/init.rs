//! `keg init` command
//!
//! Initializes a directory as a keg: the `keg` info file, the zero node,
//! and a first dex.
//!
//! # Usage
//! ```bash
//! keg init                  # Initialize the current directory
//! keg init ~/kegs/notes     # Initialize a specific path
//! keg init --no-edit        # Skip opening the info file
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::editor;
use crate::config::Config;
use crate::core::node::NodeStore;
use crate::core::store::DexStore;
use crate::core::{builder, publish};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Do not open the info file in the editor
    #[arg(long)]
    pub no_edit: bool,
}

pub fn run(args: InitArgs, config: &Config) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let store = NodeStore::init(&root)?;

    if !args.no_edit {
        editor::edit(&store.info_path(), config)?;
    }

    let dex = builder::build_from(&store)?;
    DexStore::new(&root).write(&dex)?;
    publish::from_config(&config.publish).publish(&root)?;

    println!("{} {}", "Initialized keg in".green(), root.display());
    println!("\nNext steps:");
    println!("  keg create sample");
    println!("  keg titles");
    println!("  keg latest");

    Ok(())
}
