//! `keg config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! keg config                          # Show config file
//! keg config current                  # Get a value
//! keg config current notes            # Pin the default keg
//! keg config kegs.notes ~/kegs/notes  # Register a keg
//! keg config latest.default_count 5
//! keg config --path
//! keg config --edit
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use super::editor;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., current, kegs.notes, latest.default_count)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// Edit config file in the editor
    #[arg(short, long)]
    pub edit: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, explicit: Option<&Path>, config: &Config) -> Result<()> {
    let Some(config_path) = Config::resolve_path(explicit) else {
        bail!("No config location available. Use --config or KEG_CONFIG.");
    };

    if args.path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if args.edit {
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            println!("Created {}", config_path.display());
        }
        editor::edit(&config_path, config)?;
        return Ok(());
    }

    let Some(key) = &args.key else {
        if config_path.exists() {
            println!("{}", fs::read_to_string(&config_path)?);
        } else {
            println!("No config file at {}", config_path.display());
            println!("\nCreate one with:");
            println!("  keg config --edit");
            println!("  keg config kegs.notes ~/kegs/notes");
        }
        return Ok(());
    };

    match &args.value {
        Some(value) => {
            set_config_value(&config_path, key, value)?;
            println!("{} {} = {}", "Set".green(), key, value);
        }
        None => match get_config_value(&config_path, key)? {
            Some(v) => println!("{}", v),
            None => println!("(not set)"),
        },
    }
    Ok(())
}

/// Set a value by dot notation key, keeping the rest of the file intact.
///
/// The edited document must still load as a [`Config`] before it is written.
fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    use toml_edit::{value, DocumentMut};

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        [name] => doc[*name] = value(parse_toml_value(val)),
        [section, name] => {
            if doc.get(section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*name] = value(parse_toml_value(val));
        }
        _ => bail!("Key too deep: {}. Max depth is section.key", key),
    }

    let updated = doc.to_string();
    toml::from_str::<Config>(&updated).with_context(|| format!("Invalid value for {}", key))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;
    Ok(())
}

/// Get a value by dot notation key
fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content).context("Failed to parse config.toml")?;
    let doc = toml::Value::Table(table);

    let val = key
        .split('.')
        .try_fold(&doc, |table, part| table.get(part));

    Ok(val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if let Ok(b) = s.parse::<bool>() {
        return b.into();
    }
    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }
    s.into()
}
