//! CLI module - Command definitions and handlers
//!
//! Every command resolves the active keg first. Commands that change
//! nodes finish by rebuilding the dex and publishing; the rest read the
//! dex that is already on disk.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod config;
pub mod create;
pub mod current;
pub mod delete;
pub mod dex;
pub mod dir;
pub mod edit;
pub mod editor;
pub mod init;
pub mod latest;
pub mod random;
pub mod titles;
pub mod utils;

/// keg - create and manage knowledge exchange graphs
///
/// Personal knowledge management as numbered markdown nodes with a
/// derived index of titles and latest changes.
#[derive(Parser, Debug)]
#[command(name = "keg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "KEG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a directory as a new keg
    Init(init::InitArgs),

    /// Create and edit a new node
    #[command(visible_alias = "c")]
    Create(create::CreateArgs),

    /// Choose and edit a node by ID, `last`, or title words
    #[command(visible_alias = "e")]
    Edit(edit::EditArgs),

    /// Delete a node by ID or `last`
    #[command(visible_aliases = ["del", "rm"])]
    Delete(delete::DeleteArgs),

    /// Find titles containing text
    #[command(visible_alias = "title")]
    Titles(titles::TitlesArgs),

    /// Show the most recently changed nodes
    #[command(visible_alias = "last")]
    Latest(latest::LatestArgs),

    /// Print the directory of the keg or of a node
    #[command(visible_alias = "d")]
    Dir(dir::DirArgs),

    /// Pick a random node
    #[command(visible_alias = "rand")]
    Random(random::RandomArgs),

    /// Show the current keg
    Current,

    /// Work with the index
    Dex(dex::DexArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}
