//! Store - Persist the dex as two derived artifacts
//!
//! - `dex/latest.md`: one markdown bullet per node, newest first
//! - `dex/nodes.tsv`: `ID<TAB>updated<TAB>title`, same order
//!
//! # Line format (`latest.md`)
//! ```text
//! * 2022-12-10 14:38:23Z [Title text](../123)
//! ```
//! Timestamps are UTC with whole-second precision; sub-second parts are
//! lost on a write/read round trip. Each line parses on its own, so any
//! head of the file is itself a valid index.

use std::fs;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::{debug, info};

use super::dex::Dex;
use super::error::{KegError, Result};
use super::node::{Node, NodeStore};

pub const DEX_DIR: &str = "dex";
pub const LATEST_FILE: &str = "latest.md";
pub const NODES_FILE: &str = "nodes.tsv";

/// Timestamp format inside `latest.md` lines
pub const LATEST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Timestamp format of the `nodes.tsv` second column
pub const TSV_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static LATEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\* (\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}Z) \[(.*)\]\(\.\./(\d+)\)$")
        .expect("latest line pattern is valid")
});

/// Dex artifacts of one keg
#[derive(Debug, Clone)]
pub struct DexStore {
    root: PathBuf,
}

impl DexStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn latest_path(&self) -> PathBuf {
        self.root.join(DEX_DIR).join(LATEST_FILE)
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.root.join(DEX_DIR).join(NODES_FILE)
    }

    /// Write both artifacts from the same dex snapshot.
    ///
    /// Both renderings are computed before anything touches the disk.
    /// Afterwards the `updated:` field of the keg info file follows the
    /// newest entry.
    pub fn write(&self, dex: &Dex) -> Result<()> {
        let latest = render_latest(dex);
        let nodes = render_nodes(dex);

        let dir = self.root.join(DEX_DIR);
        fs::create_dir_all(&dir).map_err(|e| KegError::io(&dir, e))?;

        let latest_path = self.latest_path();
        fs::write(&latest_path, latest).map_err(|e| KegError::io(&latest_path, e))?;
        let nodes_path = self.nodes_path();
        fs::write(&nodes_path, nodes).map_err(|e| KegError::io(&nodes_path, e))?;

        if let Some(newest) = dex.last() {
            NodeStore::open(&self.root)?.touch_info(newest.updated_at)?;
        }

        info!(entries = dex.len(), dir = %dir.display(), "wrote dex");
        Ok(())
    }

    /// Read the whole dex back from `latest.md`
    pub fn read(&self) -> Result<Dex> {
        let path = self.latest_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(KegError::not_found("dex", path));
            }
            Err(e) => return Err(KegError::io(&path, e)),
        };
        parse(&text)
    }

    /// Read only the first `n` lines of `latest.md`
    pub fn read_latest(&self, n: usize) -> Result<Dex> {
        let path = self.latest_path();
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(KegError::not_found("dex", path));
            }
            Err(e) => return Err(KegError::io(&path, e)),
        };

        let lines = BufReader::new(file)
            .lines()
            .take(n)
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| KegError::io(&path, e))?;

        parse(&lines.join("\n"))
    }
}

/// Render `latest.md` content
pub fn render_latest(dex: &Dex) -> String {
    let mut out = String::new();
    for node in dex {
        out.push_str(&format!(
            "* {} [{}](../{})\n",
            node.updated_at.format(LATEST_TIME_FORMAT),
            node.title,
            node.id
        ));
    }
    out
}

/// Render `nodes.tsv` content
pub fn render_nodes(dex: &Dex) -> String {
    let mut out = String::new();
    for node in dex {
        let title = node.title.replace(['\t', '\n', '\r'], " ");
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            node.id,
            node.updated_at.format(TSV_TIME_FORMAT),
            title
        ));
    }
    out
}

/// Parse `latest.md` lines into a dex.
///
/// Lines that do not match the format are skipped. Fails only when the
/// text has content but not a single line parses.
pub fn parse(text: &str) -> Result<Dex> {
    let mut nodes = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(node) => nodes.push(node),
            None => {
                skipped += 1;
                debug!(line, "skipping malformed dex line");
            }
        }
    }

    if nodes.is_empty() && skipped > 0 {
        return Err(KegError::Parse {
            input: text.lines().next().unwrap_or_default().to_string(),
        });
    }
    Ok(Dex::new(nodes))
}

fn parse_line(line: &str) -> Option<Node> {
    let caps = LATEST_LINE.captures(line)?;
    let updated = NaiveDateTime::parse_from_str(&caps[1], LATEST_TIME_FORMAT)
        .ok()?
        .and_utc();
    let id = caps[3].parse().ok()?;
    Some(Node::new(id, &caps[2], updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder;
    use crate::core::node::DOCUMENT;
    use chrono::{DateTime, SubsecRound, TimeZone, Utc};
    use tempfile::TempDir;

    fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(1_670_683_103 + secs, nanos).unwrap()
    }

    fn sample() -> Dex {
        Dex::new(vec![
            Node::new(3, "Alpha", at(30, 250_000_000)),
            Node::new(7, "Beta [draft]", at(10, 0)),
            Node::new(9, "", at(20, 999_999_999)),
        ])
    }

    #[test]
    fn test_render_latest_format() {
        let dex = Dex::new(vec![Node::new(123, "Title text", at(0, 0))]);
        assert_eq!(
            render_latest(&dex),
            "* 2022-12-10 14:38:23Z [Title text](../123)\n"
        );
    }

    #[test]
    fn test_round_trip_truncates_to_seconds() {
        let dex = sample();
        let parsed = parse(&render_latest(&dex)).unwrap();

        assert_eq!(parsed.len(), dex.len());
        for (a, b) in dex.iter().zip(parsed.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.updated_at.trunc_subsecs(0), b.updated_at);
        }
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let text = "\
* 2022-12-10 14:38:53Z [Alpha](../3)
garbage
* 2022-12-10 14:38:43Z [Gamma](../9
* 2022-12-10 14:38:33Z [Beta](../7)

";
        let dex = parse(text).unwrap();
        assert_eq!(dex.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 7]);
    }

    #[test]
    fn test_parse_truncated_input() {
        let full = render_latest(&sample());
        let tail: Vec<&str> = full.lines().skip(1).collect();

        let dex = parse(&tail.join("\n")).unwrap();

        assert_eq!(dex.iter().map(|n| n.id).collect::<Vec<_>>(), vec![9, 7]);
    }

    #[test]
    fn test_parse_nothing_valid_is_error() {
        let err = parse("not a dex\nat all\n").unwrap_err();
        assert!(matches!(err, KegError::Parse { .. }));
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parsed_dex_is_sorted() {
        let dex = parse(&render_latest(&sample())).unwrap();
        assert!(dex
            .nodes()
            .windows(2)
            .all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_render_nodes() {
        let dex = Dex::new(vec![
            Node::new(3, "Tab\there", at(1, 0)),
            Node::new(7, "Beta", at(0, 0)),
        ]);
        assert_eq!(
            render_nodes(&dex),
            "3\t2022-12-10T14:38:24Z\tTab here\n7\t2022-12-10T14:38:23Z\tBeta\n"
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = DexStore::new(dir.path());

        store.write(&sample()).unwrap();

        let read = store.read().unwrap();
        assert_eq!(read.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 9, 7]);
        let tsv = fs::read_to_string(store.nodes_path()).unwrap();
        assert_eq!(tsv.lines().count(), 3);
    }

    #[test]
    fn test_read_latest_head() {
        let dir = TempDir::new().unwrap();
        let store = DexStore::new(dir.path());
        store.write(&sample()).unwrap();

        assert_eq!(store.read_latest(1).unwrap().last().unwrap().id, 3);
        assert_eq!(store.read_latest(2).unwrap().len(), 2);
        assert_eq!(store.read_latest(50).unwrap().len(), 3);
        assert!(store.read_latest(0).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_dex() {
        let dir = TempDir::new().unwrap();
        let store = DexStore::new(dir.path());

        assert!(matches!(
            store.read().unwrap_err(),
            KegError::NotFound { .. }
        ));
        assert!(matches!(
            store.read_latest(3).unwrap_err(),
            KegError::NotFound { .. }
        ));
    }

    #[test]
    fn test_read_corrupt_dex_is_visible() {
        let dir = TempDir::new().unwrap();
        let store = DexStore::new(dir.path());
        fs::create_dir_all(dir.path().join(DEX_DIR)).unwrap();
        fs::write(store.latest_path(), "oops\n").unwrap();

        assert!(matches!(
            store.read_latest(1).unwrap_err(),
            KegError::Parse { .. }
        ));
    }

    #[test]
    fn test_delete_and_rebuild_drops_row() {
        let dir = TempDir::new().unwrap();
        for (id, title) in [(3, "Alpha"), (7, "Beta"), (9, "Gamma")] {
            let node = dir.path().join(id.to_string());
            fs::create_dir_all(&node).unwrap();
            fs::write(node.join(DOCUMENT), format!("# {}\n", title)).unwrap();
        }
        let store = DexStore::new(dir.path());
        store.write(&builder::build(dir.path()).unwrap()).unwrap();

        fs::remove_dir_all(dir.path().join("9")).unwrap();
        store.write(&builder::build(dir.path()).unwrap()).unwrap();

        let tsv = fs::read_to_string(store.nodes_path()).unwrap();
        let ids: Vec<&str> = tsv.lines().filter_map(|l| l.split('\t').next()).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&"9"));
        assert_eq!(store.read().unwrap().len(), 2);
    }
}
