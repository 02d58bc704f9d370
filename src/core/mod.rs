//! Core module - Node tree and the derived index
//!
//! The node tree on disk is authoritative. The dex is rebuilt from it
//! after every change and read back by the query commands.

pub mod builder;
pub mod dex;
pub mod error;
pub mod local;
pub mod node;
pub mod publish;
pub mod store;
pub mod target;

pub use dex::{Chooser, Dex, RenderMode};
pub use error::KegError;
pub use local::Local;
pub use node::{Node, NodeStore};
pub use store::DexStore;
