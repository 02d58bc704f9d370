//! Builder - Rebuild the dex from the node tree
//!
//! A full scan every time. Unreadable nodes are logged and left out so a
//! single bad node never blocks the index.

use std::path::Path;

use tracing::{debug, warn};

use super::dex::Dex;
use super::error::Result;
use super::node::NodeStore;

/// Scan the keg at `root` and build a fresh dex.
///
/// # Errors
/// `NotFound` if `root` does not exist, `Io` if it cannot be listed.
pub fn build(root: &Path) -> Result<Dex> {
    let store = NodeStore::open(root)?;
    build_from(&store)
}

/// Build a dex from an already opened node store
pub fn build_from(store: &NodeStore) -> Result<Dex> {
    let ids = store.ids()?;
    let mut nodes = Vec::with_capacity(ids.len());

    for id in ids {
        match store.read_node(id) {
            Ok(Some(node)) => nodes.push(node),
            Ok(None) => debug!(id, "skipping empty or missing node"),
            Err(e) => warn!(id, error = %e, "skipping unreadable node"),
        }
    }

    let dex = Dex::new(nodes);
    debug!(entries = dex.len(), root = %store.root().display(), "built dex");
    Ok(dex)
}
