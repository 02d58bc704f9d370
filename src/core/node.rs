//! Node - Content nodes and the on-disk node tree
//!
//! A node is a directory named by its integer ID holding a single
//! `README.md`. The node tree is the source of truth: everything in the
//! dex is derived from it.
//!
//! # Layout
//! ```text
//! <root>/keg            info file (marks the directory as a keg)
//! <root>/0/README.md    zero node
//! <root>/12/README.md   node 12
//! <root>/dex/           derived index artifacts
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::{KegError, Result};
use super::store::LATEST_TIME_FORMAT;

/// Primary document file inside every node directory
pub const DOCUMENT: &str = "README.md";

/// Keg info file; its presence marks a directory as a keg
pub const INFO_FILE: &str = "keg";

/// Highest ID ever handed out, so deleted IDs are not reused
const HIGH_WATER_FILE: &str = ".keg-high";

/// One knowledge unit as seen by the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Node ID (directory name)
    pub id: u64,

    /// First heading of the document, empty if none
    pub title: String,

    /// Last modification of the document
    pub updated_at: DateTime<Utc>,
}

impl Node {
    pub fn new(id: u64, title: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            updated_at,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.title)
    }
}

/// Extract the title from a node document.
///
/// The title is the first `#` line that still has text once the leading
/// hashes are stripped. Documents without one have an empty title.
///
/// # Examples
/// ```
/// use keg::core::node::extract_title;
///
/// assert_eq!(extract_title("\n# Hello World\n\nbody"), "Hello World");
/// assert_eq!(extract_title("no heading here"), "");
/// ```
pub fn extract_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim())
        .find(|title| !title.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Parse a directory name as a node ID.
///
/// Only the canonical decimal form is accepted (`"7"`, not `"007"`), so
/// the ID always maps back to the same directory.
pub fn parse_node_id(name: &str) -> Option<u64> {
    let id: u64 = name.parse().ok()?;
    (id.to_string() == name).then_some(id)
}

/// The on-disk node tree of one keg
#[derive(Debug, Clone)]
pub struct NodeStore {
    root: PathBuf,
}

impl NodeStore {
    /// Open an existing keg root
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(KegError::not_found("keg directory", root));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Initialize `root` as a keg: info file (kept if present) and zero node
    pub fn init(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| KegError::io(root, e))?;
        let store = Self {
            root: root.to_path_buf(),
        };

        let info = store.info_path();
        if !info.exists() {
            fs::write(&info, DEFAULT_INFO_FILE).map_err(|e| KegError::io(&info, e))?;
        }

        let zero = store.document_path(0);
        let zero_dir = store.node_dir(0);
        fs::create_dir_all(&zero_dir).map_err(|e| KegError::io(&zero_dir, e))?;
        fs::write(&zero, DEFAULT_ZERO_NODE).map_err(|e| KegError::io(&zero, e))?;

        info!(root = %root.display(), "initialized keg");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn info_path(&self) -> PathBuf {
        self.root.join(INFO_FILE)
    }

    pub fn node_dir(&self, id: u64) -> PathBuf {
        self.root.join(id.to_string())
    }

    pub fn document_path(&self, id: u64) -> PathBuf {
        self.node_dir(id).join(DOCUMENT)
    }

    /// Whether node `id` has a document on disk (empty or not)
    pub fn exists(&self, id: u64) -> bool {
        self.document_path(id).is_file()
    }

    /// IDs of all node directories, ascending
    pub fn ids(&self) -> Result<Vec<u64>> {
        let entries = fs::read_dir(&self.root).map_err(|e| KegError::io(&self.root, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            match entry.file_name().to_str().and_then(parse_node_id) {
                Some(id) => ids.push(id),
                None => debug!(name = ?entry.file_name(), "not a node directory"),
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Read the index view of node `id`.
    ///
    /// Returns `None` when the document is missing or empty: such a node
    /// does not exist as far as the index is concerned.
    pub fn read_node(&self, id: u64) -> Result<Option<Node>> {
        let path = self.document_path(id);

        let Some(text) = read_document(&path)? else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| KegError::io(&path, e))?;

        Ok(Some(Node::new(id, extract_title(&text), modified.into())))
    }

    /// Next unused ID: one past the highest ID ever seen
    pub fn next_id(&self) -> Result<u64> {
        let highest = self.ids()?.last().copied();
        let high_water = self.read_high_water();

        match highest.max(high_water) {
            None => Ok(1),
            Some(top) => top.checked_add(1).ok_or(KegError::IdsExhausted),
        }
    }

    /// Create an empty node under the next unused ID
    pub fn make_node(&self) -> Result<u64> {
        let id = self.next_id()?;
        let dir = self.node_dir(id);
        fs::create_dir_all(&dir).map_err(|e| KegError::io(&dir, e))?;

        let doc = self.document_path(id);
        fs::write(&doc, "").map_err(|e| KegError::io(&doc, e))?;

        let mark = self.root.join(HIGH_WATER_FILE);
        fs::write(&mark, format!("{}\n", id)).map_err(|e| KegError::io(&mark, e))?;

        info!(id, "created node");
        Ok(id)
    }

    /// Fill node `id` with the markup sample document
    pub fn write_sample(&self, id: u64) -> Result<()> {
        let doc = self.document_path(id);
        fs::write(&doc, SAMPLE_NODE).map_err(|e| KegError::io(&doc, e))
    }

    /// Whether the document of node `id` is empty or whitespace only
    pub fn is_empty(&self, id: u64) -> Result<bool> {
        let doc = self.document_path(id);
        match read_document(&doc)? {
            Some(text) => Ok(text.trim().is_empty()),
            None => Err(KegError::not_found("node document", doc)),
        }
    }

    /// Remove node `id` if its document is empty; returns whether it was removed
    pub fn remove_if_empty(&self, id: u64) -> Result<bool> {
        if !self.is_empty(id)? {
            return Ok(false);
        }
        self.delete_node(id)?;
        Ok(true)
    }

    /// Remove the node directory for `id`
    pub fn delete_node(&self, id: u64) -> Result<()> {
        let dir = self.node_dir(id);
        if !dir.is_dir() {
            return Err(KegError::not_found("node", dir));
        }
        fs::remove_dir_all(&dir).map_err(|e| KegError::io(&dir, e))?;
        info!(id, "deleted node");
        Ok(())
    }

    /// Point the `updated:` field of the info file at `updated`.
    ///
    /// Does nothing when the info file or the field is absent.
    pub fn touch_info(&self, updated: DateTime<Utc>) -> Result<()> {
        let path = self.info_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(KegError::io(&path, e)),
        };

        let stamp = updated.format(LATEST_TIME_FORMAT).to_string();
        let mut changed = false;
        let lines: Vec<String> = text
            .lines()
            .map(|line| {
                if !changed && line.starts_with("updated:") {
                    changed = true;
                    format!("updated: {}", stamp)
                } else {
                    line.to_string()
                }
            })
            .collect();

        if changed {
            let mut out = lines.join("\n");
            out.push('\n');
            if out != text {
                fs::write(&path, out).map_err(|e| KegError::io(&path, e))?;
            }
        }
        Ok(())
    }

    fn read_high_water(&self) -> Option<u64> {
        let path = self.root.join(HIGH_WATER_FILE);
        let text = fs::read_to_string(&path).ok()?;
        match text.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(path = %path.display(), "ignoring malformed high-water mark");
                None
            }
        }
    }
}

/// Read a node document, `None` if it does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected, so a stray Latin-1
/// byte never hides a node.
fn read_document(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(KegError::io(path, e)),
    }
}

/// Info file written by `keg init`
pub const DEFAULT_INFO_FILE: &str = "\
updated: 2023-01-01 00:00:00Z
kegv: 2023-01
title: I'm Just a Sample Title
url: git@github.com:YOU/keg.git
creator: git@github.com:YOU/YOU.git
state: living
summary: |
  Describe what this keg is about. The first sentence should stand on
  its own.
indexes:
  - file: dex/latest.md
    summary: latest changes
  - file: dex/nodes.tsv
    summary: all nodes by id
";

/// Zero node, the link target for planned but unwritten content
pub const DEFAULT_ZERO_NODE: &str = "\
# Sorry, planned but not yet available

This is a filler until a node is created for this content. Links
pointing here mark ideas that have not been written up yet.
";

/// Sample node written by `keg create sample`
pub const SAMPLE_NODE: &str = "\
# Sample Node Title Under 72 Characters

Every node starts with a single level-one heading: that line is the
title shown by `keg titles` and `keg latest`. Keep it short and unique.

## Paragraphs and inline markup

Write plain paragraphs separated by blank lines. Use *emphasis*,
**strong**, and `verbatim` sparingly.

## Links and includes

Link to another node with a relative path: [Zero Node](../0). A bullet
holding nothing but such a link is an include:

* [Zero Node](../0)

## Lists

* bulleted item
* another item

1. numbered item
1. another numbered item

## Fenced code

```sh
keg titles sample
```

Delete everything in this file and save to remove the node.
";
