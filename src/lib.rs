//! keg - Knowledge Exchange Graph manager
//!
//! A keg is a directory of numbered content nodes, each one a
//! `README.md` in its own directory. On top of the nodes sits the dex,
//! an index rebuilt after every change and kept on disk as
//! `dex/latest.md` and `dex/nodes.tsv`.
//!
//! ## Key Concepts
//!
//! - **Node**: directory named by an integer ID; title is the first heading
//! - **Dex**: nodes ordered newest first, derived and rebuildable
//! - **Rebuild after mutation**: create, edit, and delete always end with
//!   a full rebuild, so the dex never lags the nodes for long
//! - **Local**: the keg a command works on, resolved from `KEG_CURRENT`,
//!   the working directory, or the config

pub mod cli;
pub mod config;
pub mod core;

pub use core::builder::build;
pub use core::dex::{Chooser, Dex, RenderMode};
pub use core::error::KegError;
pub use core::local::{resolve_active, Local};
pub use core::node::{Node, NodeStore};
pub use core::store::DexStore;
