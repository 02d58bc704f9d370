//! `keg latest` command
//!
//! Shows the most recently changed nodes, reading only the head of
//! `dex/latest.md`.
//!
//! # Usage
//! ```bash
//! keg latest        # `latest.default_count` entries (1 unless configured)
//! keg latest 10
//! ```

use anyhow::{Context, Result};
use clap::Args;

use super::utils::{self, OutputFormat};
use crate::config::Config;
use crate::core::store::DexStore;

#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Number of nodes to show
    pub count: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

pub fn run(args: LatestArgs, config: &Config) -> Result<()> {
    let count = args.count.unwrap_or(config.latest.default_count);
    let keg = utils::open_keg(config)?;

    let dex = DexStore::new(&keg.path)
        .read_latest(count)
        .with_context(|| format!("Unable to read latest nodes of {:?}", keg.name))?;

    utils::print_dex(&dex, args.format)
}
