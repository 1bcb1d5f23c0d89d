//! Arena node representation.

use std::collections::BTreeMap;

/// Integer identifier of a vocabulary token.
pub type TokenId = u32;

/// Index of a node in the tree's arena.
///
/// Nodes reference each other by arena index rather than by owning
/// pointers, so a node merged into several branches can be shared by
/// multiple parents without ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One token occurrence at one position in the merged completion graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Token this node represents (`None` only for the root).
    token_id: Option<TokenId>,
    /// Distance from the root (root = 0).
    depth: usize,
    /// Number of completions whose path passes through this node.
    pass_count: usize,
    /// Number of completions whose path terminates at this node.
    leaf_count: usize,
    /// Running sum of scores attributed to completions through this node.
    score_sum: f64,
    /// Number of scores folded into `score_sum`.
    score_count: usize,
    /// Children keyed by token id; BTreeMap fixes the traversal order.
    children: BTreeMap<TokenId, NodeId>,
}

impl Node {
    /// Create the root node.
    pub(crate) fn root() -> Self {
        Self {
            token_id: None,
            depth: 0,
            pass_count: 0,
            leaf_count: 0,
            score_sum: 0.0,
            score_count: 0,
            children: BTreeMap::new(),
        }
    }

    /// Create a token node at the given depth.
    pub(crate) fn token(token_id: TokenId, depth: usize) -> Self {
        Self {
            token_id: Some(token_id),
            depth,
            pass_count: 0,
            leaf_count: 0,
            score_sum: 0.0,
            score_count: 0,
            children: BTreeMap::new(),
        }
    }

    /// Token this node represents, `None` for the root.
    pub fn token_id(&self) -> Option<TokenId> {
        self.token_id
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of completions passing through this node.
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Number of completions terminating at this node.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Whether at least one completion terminates here.
    pub fn is_endpoint(&self) -> bool {
        self.leaf_count > 0
    }

    /// Sum of scores attributed to this node.
    pub fn score_sum(&self) -> f64 {
        self.score_sum
    }

    /// Number of scores attributed to this node.
    pub fn score_count(&self) -> usize {
        self.score_count
    }

    /// Mean score of completions through this node, `None` if no score
    /// was attributed here.
    pub fn mean_score(&self) -> Option<f64> {
        if self.score_count == 0 {
            None
        } else {
            Some(self.score_sum / self.score_count as f64)
        }
    }

    /// Children in ascending token-id order.
    pub fn children(&self) -> impl Iterator<Item = (TokenId, NodeId)> + '_ {
        self.children.iter().map(|(&t, &c)| (t, c))
    }

    /// Number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Look up the child reached by `token`.
    pub fn child(&self, token: TokenId) -> Option<NodeId> {
        self.children.get(&token).copied()
    }

    /// Attach or repoint the child reached by `token`.
    pub(crate) fn set_child(&mut self, token: TokenId, child: NodeId) {
        self.children.insert(token, child);
    }

    /// Record one completion passing through this node.
    pub(crate) fn record_pass(&mut self) {
        self.pass_count += 1;
    }

    /// Record one completion terminating at this node.
    pub(crate) fn record_leaf(&mut self) {
        self.leaf_count += 1;
    }

    /// Attribute one completion's score to this node.
    pub(crate) fn record_score(&mut self, score: f64) {
        self.score_sum += score;
        self.score_count += 1;
    }

    /// Fold another node's traversal statistics into this one.
    ///
    /// Used when a structurally identical subtree is collapsed into this
    /// node during the DAG-merge pass.
    pub(crate) fn absorb_stats(&mut self, other: &Node) {
        self.pass_count += other.pass_count;
        self.leaf_count += other.leaf_count;
        self.score_sum += other.score_sum;
        self.score_count += other.score_count;
    }

    /// Remap child ids through `map` (arena compaction).
    pub(crate) fn remap_children(&mut self, map: impl Fn(NodeId) -> NodeId) {
        for child in self.children.values_mut() {
            *child = map(*child);
        }
    }
}
