//! Target - Node arguments given on the command line
//!
//! A node can be named by ID, by the `last` keyword (most recently
//! updated node), or by words from its title.

use super::dex::{Chooser, Dex};
use super::error::{KegError, Result};

/// Keyword for the most recently updated node
pub const LAST: &str = "last";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Last,
    Id(u64),
    Title(String),
}

impl Target {
    /// Parse command words; anything that is not an ID or `last` is title text
    pub fn parse(words: &[String]) -> Result<Self> {
        let joined = words.join(" ");
        let text = joined.trim();
        if text.is_empty() {
            return Err(KegError::InvalidTarget(String::new()));
        }
        if text == LAST {
            return Ok(Target::Last);
        }
        Ok(match text.parse() {
            Ok(id) => Target::Id(id),
            Err(_) => Target::Title(text.to_string()),
        })
    }

    /// Parse a target that must be an ID or `last`
    pub fn parse_strict(arg: &str) -> Result<Self> {
        match Self::parse(&[arg.to_string()])? {
            Target::Title(text) => Err(KegError::InvalidTarget(text)),
            target => Ok(target),
        }
    }

    /// Whether resolving needs the dex
    pub fn needs_dex(&self) -> bool {
        !matches!(self, Target::Id(_))
    }

    /// Resolve to a node ID
    pub fn resolve<C>(&self, dex: &Dex, chooser: &mut C) -> Result<u64>
    where
        C: Chooser + ?Sized,
    {
        match self {
            Target::Id(id) => Ok(*id),
            Target::Last => dex
                .latest(1)
                .last()
                .map(|n| n.id)
                .ok_or_else(|| KegError::NoMatch(LAST.to_string())),
            Target::Title(text) => dex
                .choose_with_title_text(text, chooser)?
                .map(|n| n.id)
                .ok_or_else(|| KegError::NoMatch(text.clone())),
        }
    }
}
