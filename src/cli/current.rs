//! `keg current` command
//!
//! Prints the name of the keg commands operate on. See
//! [`crate::core::local`] for how it is chosen.

use anyhow::Result;

use super::utils;
use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let keg = utils::open_keg(config)?;
    println!("{}", keg.name);
    Ok(())
}
