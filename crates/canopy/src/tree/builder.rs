//! Build validation and trie insertion.

use super::merge;
use super::node::{Node, NodeId, TokenId};
use super::CompletionTree;
use crate::error::{CanopyError, Result};
use tracing::debug;

/// Builder for [`CompletionTree`].
///
/// # Example
///
/// ```rust
/// use canopy::tree::CompletionTree;
///
/// let tree = CompletionTree::builder()
///     .completions(vec![vec![1, 2], vec![1, 3]])
///     .scores(vec![1.0, 0.0])
///     .merge_suffixes(true)
///     .build()
///     .unwrap();
/// assert_eq!(tree.node_count(), 4);
/// ```
#[derive(Debug)]
pub struct CompletionTreeBuilder {
    completions: Vec<Vec<TokenId>>,
    scores: Option<Vec<f64>>,
    merge_suffixes: bool,
}

impl Default for CompletionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionTreeBuilder {
    /// Create a builder with suffix merging enabled.
    pub fn new() -> Self {
        Self {
            completions: Vec::new(),
            scores: None,
            merge_suffixes: true,
        }
    }

    /// Set the completions to insert, one token-id sequence per
    /// completion.
    pub fn completions(mut self, completions: Vec<Vec<TokenId>>) -> Self {
        self.completions = completions;
        self
    }

    /// Set per-completion scores, aligned by index with the
    /// completions.
    ///
    /// Scores are expected in `[0.0, 1.0]` where 1.0 marks a good
    /// completion; out-of-range values are accepted and only shift the
    /// rendered color gradient.
    pub fn scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = Some(scores);
        self
    }

    /// Enable or disable the suffix-merge pass (enabled by default).
    ///
    /// When disabled the result is a plain prefix tree.
    pub fn merge_suffixes(mut self, merge: bool) -> Self {
        self.merge_suffixes = merge;
        self
    }

    /// Build the tree.
    ///
    /// Fails with [`CanopyError::InvalidInput`] if no completions were
    /// supplied or the score vector length does not match.
    pub fn build(self) -> Result<CompletionTree> {
        if self.completions.is_empty() {
            return Err(CanopyError::InvalidInput(
                "completion set is empty".to_string(),
            ));
        }
        if let Some(scores) = &self.scores {
            if scores.len() != self.completions.len() {
                return Err(CanopyError::InvalidInput(format!(
                    "{} scores for {} completions",
                    scores.len(),
                    self.completions.len()
                )));
            }
        }

        let has_scores = self.scores.is_some();
        let mut nodes = vec![Node::root()];

        for (i, tokens) in self.completions.iter().enumerate() {
            let score = self.scores.as_ref().map(|s| s[i]);
            insert(&mut nodes, tokens, score);
        }
        debug!(
            completions = self.completions.len(),
            nodes = nodes.len(),
            "trie insertion complete"
        );

        if self.merge_suffixes {
            let before = nodes.len();
            merge::merge_suffixes(&mut nodes);
            debug!(before, after = nodes.len(), "suffix merge complete");
        }

        Ok(CompletionTree::new(nodes, has_scores))
    }
}

/// Insert one completion path into the arena trie.
fn insert(nodes: &mut Vec<Node>, tokens: &[TokenId], score: Option<f64>) {
    let mut cursor = NodeId::ROOT;
    nodes[cursor.index()].record_pass();

    for (i, &token) in tokens.iter().enumerate() {
        cursor = match nodes[cursor.index()].child(token) {
            Some(child) => child,
            None => {
                let child = NodeId(nodes.len() as u32);
                nodes.push(Node::token(token, i + 1));
                nodes[cursor.index()].set_child(token, child);
                child
            }
        };
        nodes[cursor.index()].record_pass();
        if let Some(score) = score {
            nodes[cursor.index()].record_score(score);
        }
    }

    // The final cursor is this completion's endpoint.
    nodes[cursor.index()].record_leaf();
}
