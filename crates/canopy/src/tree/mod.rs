//! Merged completion tree/DAG construction.
//!
//! This module provides:
//! - An arena-backed node graph merging N token completions
//! - Trie insertion with per-node traversal statistics
//! - An optional suffix-merge pass that collapses identical
//!   continuations into shared nodes, turning the trie into a DAG
//!
//! # Overview
//!
//! Each completion is inserted along a root-to-leaf path. Completions
//! that agree on a prefix share that path; where they disagree the path
//! branches. The suffix-merge pass then collapses branches whose
//! remaining continuations are token-for-token identical, so paths that
//! diverge early and reconverge on the same ending are drawn as one.
//!
//! # Example
//!
//! ```rust
//! use canopy::tree::CompletionTree;
//!
//! let tree = CompletionTree::builder()
//!     .completions(vec![vec![1, 2, 3], vec![4, 2, 3]])
//!     .scores(vec![1.0, 0.0])
//!     .build()
//!     .unwrap();
//!
//! // Both completions are counted at the root.
//! assert_eq!(tree.get(canopy::tree::NodeId::ROOT).unwrap().pass_count(), 2);
//! ```

mod builder;
mod merge;
mod node;

pub use builder::CompletionTreeBuilder;
pub use node::{Node, NodeId, TokenId};

use std::collections::HashSet;
use std::collections::VecDeque;

/// The merged node graph built from a set of token completions.
///
/// Immutable after construction. Nodes live in an arena indexed by
/// [`NodeId`]; after the suffix-merge pass a node may be referenced by
/// several parents, so the structure is a DAG rather than a strict tree.
#[derive(Debug, Clone)]
pub struct CompletionTree {
    nodes: Vec<Node>,
    has_scores: bool,
}

impl CompletionTree {
    /// Start building a tree with the builder API.
    pub fn builder() -> CompletionTreeBuilder {
        CompletionTreeBuilder::new()
    }

    /// Build a tree from completions (and optional per-completion
    /// scores) with suffix merging enabled.
    pub fn from_completions(
        completions: Vec<Vec<TokenId>>,
        scores: Option<Vec<f64>>,
    ) -> crate::Result<Self> {
        let mut b = Self::builder().completions(completions);
        if let Some(scores) = scores {
            b = b.scores(scores);
        }
        b.build()
    }

    pub(crate) fn new(nodes: Vec<Node>, has_scores: bool) -> Self {
        Self { nodes, has_scores }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the graph (after merging, only reachable
    /// nodes remain).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether scores were supplied at build time.
    pub fn has_scores(&self) -> bool {
        self.has_scores
    }

    /// Breadth-first walk from the root, yielding each node exactly
    /// once regardless of how many parents reference it.
    ///
    /// Children are visited in ascending token-id order, so the walk
    /// order is deterministic for a given graph.
    pub fn walk(&self) -> Walk<'_> {
        let mut queue = VecDeque::new();
        queue.push_back(NodeId::ROOT);
        let mut seen = HashSet::new();
        seen.insert(NodeId::ROOT);
        Walk {
            tree: self,
            queue,
            seen,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator over the graph in breadth-first order. See
/// [`CompletionTree::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    tree: &'a CompletionTree,
    queue: VecDeque<NodeId>,
    seen: HashSet<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        for (_, child) in self.tree.node(id).children() {
            if self.seen.insert(child) {
                self.queue.push_back(child);
            }
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_visits_every_node_once() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 2, 3], vec![4, 2, 3], vec![1, 5]])
            .build()
            .unwrap();

        let order: Vec<NodeId> = tree.walk().collect();
        let unique: HashSet<NodeId> = order.iter().copied().collect();
        assert_eq!(order.len(), unique.len());
        assert_eq!(order.len(), tree.node_count());
        assert_eq!(order[0], NodeId::ROOT);
    }

    #[test]
    fn walk_is_deterministic() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![9, 1], vec![3, 1], vec![7]])
            .build()
            .unwrap();

        let a: Vec<NodeId> = tree.walk().collect();
        let b: Vec<NodeId> = tree.walk().collect();
        assert_eq!(a, b);

        // Root's children come out in ascending token order.
        let root = tree.get(NodeId::ROOT).unwrap();
        let tokens: Vec<TokenId> = root.children().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![3, 7, 9]);
    }
}
