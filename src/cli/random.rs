//! `keg random` command
//!
//! Picks a random node to review, which helps to resurface old ideas.
//!
//! # Usage
//! ```bash
//! keg random          # Edit a random node (include line when piped)
//! keg random title
//! keg random id
//! keg random dir
//! ```

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use super::{edit, utils};
use crate::config::Config;
use crate::core::dex::{Dex, RenderMode};
use crate::core::node::NodeStore;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum RandomOutput {
    /// Print the title
    Title,
    /// Print the node ID
    Id,
    /// Print the node directory
    Dir,
    /// Open the node in the editor
    #[default]
    Edit,
}

#[derive(Args, Debug)]
pub struct RandomArgs {
    /// What to do with the chosen node
    #[arg(value_enum, default_value = "edit")]
    pub output: RandomOutput,
}

pub fn run(args: RandomArgs, config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;
    let dex = utils::read_dex(&keg)?;

    let mut rng = rand::thread_rng();
    let Some(node) = dex.random(&mut rng) else {
        bail!("keg {:?} has no nodes", keg.name);
    };

    match args.output {
        RandomOutput::Title => println!("{}", node.title),
        RandomOutput::Id => println!("{}", node.id),
        RandomOutput::Dir => {
            println!("{}", NodeStore::open(&keg.path)?.node_dir(node.id).display())
        }
        RandomOutput::Edit if !utils::is_interactive() => {
            print!("{}", Dex::new(vec![node.clone()]).render(RenderMode::Includes))
        }
        RandomOutput::Edit => edit::edit_node(&keg, node.id, config)?,
    }
    Ok(())
}
