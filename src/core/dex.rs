//! Dex - The derived node index
//!
//! An ordered list of nodes, newest first. A dex is a cache: it can
//! always be rebuilt from the node tree and never overrides it.
//!
//! Everything here is pure. The one exception is
//! [`Dex::choose_with_title_text`], which defers to a [`Chooser`] when a
//! query is ambiguous.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::error::{KegError, Result};
use super::node::Node;

/// Time format used by the pretty rendering
const PRETTY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output encoding of a dex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Human-oriented listing for terminals
    Pretty,
    /// One include line per node for piping into documents
    Includes,
}

/// Resolves an ambiguous title query to one candidate.
///
/// Implementations return the index of the chosen candidate, or `None`
/// when the user aborts.
pub trait Chooser {
    fn choose(&mut self, candidates: &[Node]) -> Result<Option<usize>>;
}

/// Node index sorted by `updated_at`, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dex {
    nodes: Vec<Node>,
}

impl Dex {
    /// Build a dex from nodes in scan order.
    ///
    /// The sort is stable, so nodes with equal timestamps keep the order
    /// they were given in.
    pub fn new(mut nodes: Vec<Node>) -> Self {
        nodes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Find an entry by node ID
    pub fn get(&self, id: u64) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Entries whose title contains `text`, ignoring case.
    ///
    /// Empty `text` matches everything. Order is preserved.
    pub fn with_title_text(&self, text: &str) -> Dex {
        let needle = text.to_lowercase();
        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Dex { nodes }
    }

    /// Resolve `text` to a single node.
    ///
    /// A single match is returned without prompting. Several matches are
    /// handed to `chooser`. No match, or an aborted prompt, yields `None`.
    pub fn choose_with_title_text<C>(&self, text: &str, chooser: &mut C) -> Result<Option<&Node>>
    where
        C: Chooser + ?Sized,
    {
        let needle = text.to_lowercase();
        let matches: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|n| n.title.to_lowercase().contains(&needle))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            _ => {
                let candidates: Vec<Node> = matches.iter().map(|n| (*n).clone()).collect();
                match chooser.choose(&candidates)? {
                    Some(i) if i < matches.len() => Ok(Some(matches[i])),
                    Some(i) => Err(KegError::Prompt(format!(
                        "choice {} out of range (1-{})",
                        i + 1,
                        matches.len()
                    ))),
                    None => Ok(None),
                }
            }
        }
    }

    /// The `n` most recently updated entries
    pub fn latest(&self, n: usize) -> Dex {
        Dex {
            nodes: self.nodes.iter().take(n).cloned().collect(),
        }
    }

    /// Most recently updated node; what the `last` argument refers to
    pub fn last(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Uniformly random entry, `None` on an empty dex
    pub fn random<R>(&self, rng: &mut R) -> Option<&Node>
    where
        R: Rng + ?Sized,
    {
        self.nodes.choose(rng)
    }

    /// Render for a terminal: `ID  date  title` per line
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&format!(
                "{:>6}  {}  {}\n",
                node.id,
                node.updated_at.format(PRETTY_TIME_FORMAT),
                node.title
            ));
        }
        out
    }

    /// Render as include lines: `* [title](../ID)`
    pub fn as_includes(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&format!("* [{}](../{})\n", node.title, node.id));
        }
        out
    }

    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::Pretty => self.pretty(),
            RenderMode::Includes => self.as_includes(),
        }
    }
}

impl<'a> IntoIterator for &'a Dex {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ids(dex: &Dex) -> Vec<u64> {
        dex.iter().map(|n| n.id).collect()
    }

    /// {3: Alpha @ t3}, {7: Beta @ t1}, {9: Gamma @ t2}
    fn sample() -> Dex {
        Dex::new(vec![
            Node::new(3, "Alpha", at(3)),
            Node::new(7, "Beta", at(1)),
            Node::new(9, "Gamma", at(2)),
        ])
    }

    /// Replays a fixed answer and records how often it was asked
    struct Scripted {
        answer: Option<usize>,
        asked: usize,
    }

    impl Chooser for Scripted {
        fn choose(&mut self, _candidates: &[Node]) -> Result<Option<usize>> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    #[test]
    fn test_new_sorts_newest_first() {
        assert_eq!(ids(&sample()), vec![3, 9, 7]);
    }

    #[test]
    fn test_new_ties_keep_scan_order() {
        let dex = Dex::new(vec![
            Node::new(5, "E", at(1)),
            Node::new(2, "B", at(1)),
            Node::new(8, "H", at(2)),
            Node::new(1, "A", at(1)),
        ]);
        assert_eq!(ids(&dex), vec![8, 5, 2, 1]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let dex = sample();
        assert_eq!(ids(&dex.with_title_text("a")), vec![3, 9, 7]);
        assert_eq!(ids(&dex.with_title_text("GAM")), vec![9]);
    }

    #[test]
    fn test_filter_empty_text_matches_all() {
        let dex = sample();
        assert_eq!(dex.with_title_text(""), dex);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        assert!(sample().with_title_text("zeta").is_empty());
    }

    #[test]
    fn test_choose_single_match_does_not_prompt() {
        let dex = sample();
        let mut chooser = Scripted {
            answer: Some(0),
            asked: 0,
        };

        let node = dex.choose_with_title_text("beta", &mut chooser).unwrap();

        assert_eq!(node.map(|n| n.id), Some(7));
        assert_eq!(chooser.asked, 0);
    }

    #[test]
    fn test_choose_multiple_matches_prompts() {
        let dex = sample();
        let mut chooser = Scripted {
            answer: Some(1),
            asked: 0,
        };

        let node = dex.choose_with_title_text("a", &mut chooser).unwrap();

        assert_eq!(node.map(|n| n.id), Some(9));
        assert_eq!(chooser.asked, 1);
    }

    #[test]
    fn test_choose_abort_and_no_match() {
        let dex = sample();
        let mut chooser = Scripted {
            answer: None,
            asked: 0,
        };

        assert!(dex.choose_with_title_text("a", &mut chooser).unwrap().is_none());
        assert!(dex
            .choose_with_title_text("nothing", &mut chooser)
            .unwrap()
            .is_none());
        assert_eq!(chooser.asked, 1);
    }

    #[test]
    fn test_choose_out_of_range() {
        let mut chooser = Scripted {
            answer: Some(7),
            asked: 0,
        };
        let err = sample().choose_with_title_text("", &mut chooser).unwrap_err();
        assert!(matches!(err, KegError::Prompt(_)));
    }

    #[test]
    fn test_latest_bounds() {
        let dex = sample();
        assert!(dex.latest(0).is_empty());
        assert_eq!(ids(&dex.latest(2)), vec![3, 9]);
        assert_eq!(dex.latest(dex.len() + 5), dex);
    }

    #[test]
    fn test_last() {
        assert_eq!(sample().last().map(|n| n.id), Some(3));
        assert!(Dex::default().last().is_none());
    }

    #[test]
    fn test_random_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(Dex::default().random(&mut rng).is_none());
    }

    #[test]
    fn test_random_deterministic_with_seed() {
        let dex = sample();
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            dex.random(&mut rng).map(|n| n.id)
        };

        assert_eq!(pick(42), pick(42));
        assert!(dex.get(pick(42).unwrap()).is_some());
    }

    #[test]
    fn test_random_reaches_every_entry() {
        let dex = sample();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(dex.random(&mut rng).unwrap().id);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![3, 7, 9]);
    }

    #[test]
    fn test_as_includes() {
        assert_eq!(
            sample().latest(2).as_includes(),
            "* [Alpha](../3)\n* [Gamma](../9)\n"
        );
    }

    #[test]
    fn test_pretty() {
        let dex = Dex::new(vec![Node::new(12, "Hello", at(0))]);
        assert_eq!(dex.pretty(), "    12  2023-11-14 22:13  Hello\n");
        assert_eq!(dex.render(RenderMode::Pretty), dex.pretty());
        assert_eq!(dex.render(RenderMode::Includes), "* [Hello](../12)\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Dex::default().pretty(), "");
        assert_eq!(Dex::default().as_includes(), "");
    }

    #[test]
    fn test_serialize_json() {
        let dex = Dex::new(vec![Node::new(1, "One", at(0))]);
        let json = serde_json::to_value(&dex).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["title"], "One");
    }
}
