//! `keg titles` command
//!
//! Lists nodes whose title contains the given words (case-insensitive).
//!
//! # Usage
//! ```bash
//! keg titles                  # Every node
//! keg titles rust             # Titles containing "rust"
//! keg titles rust | pbcopy    # Include lines when piped
//! keg titles rust -f json
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::{self, OutputFormat};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct TitlesArgs {
    /// Words to look for in titles (all nodes if omitted)
    pub words: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

pub fn run(args: TitlesArgs, config: &Config) -> Result<()> {
    print_matching(&args.words, args.format, config)
}

/// Print every node whose title contains `words`
pub fn print_matching(words: &[String], format: OutputFormat, config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;
    let dex = utils::read_dex(&keg)?;
    utils::print_dex(&dex.with_title_text(&words.join(" ")), format)
}
