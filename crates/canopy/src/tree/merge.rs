//! Suffix merging: collapse structurally identical continuations.
//!
//! Two branches that diverge early but end in the same remaining token
//! sequence are collapsed into one shared subtree, so rendered paths
//! visibly reconverge. Traversal statistics of collapsed duplicates are
//! summed into the surviving node; identity is purely structural.

use super::node::{Node, NodeId, TokenId};
use std::collections::{HashMap, VecDeque};

/// Canonical fingerprint of a subtree's shape.
///
/// Children are recorded as (token, canonical child id) pairs in token
/// order; because children are canonicalized before their parent, equal
/// signatures imply token-for-token identical continuations. Counts and
/// scores are deliberately not part of the signature.
#[derive(PartialEq, Eq, Hash)]
struct Signature {
    token_id: Option<TokenId>,
    children: Vec<(TokenId, NodeId)>,
}

/// Collapse identical suffix subtrees and drop the orphaned arena
/// slots. The root is never merged.
pub(super) fn merge_suffixes(nodes: &mut Vec<Node>) {
    canonicalize(nodes);
    compact(nodes);
}

/// One in-progress node of the post-order walk. `entries` is the child
/// snapshot taken before any repointing; `next` is the first child not
/// yet descended into.
struct Frame {
    id: NodeId,
    entries: Vec<(TokenId, NodeId)>,
    next: usize,
}

/// Post-order canonicalization over an explicit stack (completions can
/// be arbitrarily long, so recursion depth is not an option). When a
/// frame pops, all of its children are resolved: duplicate subtrees
/// have their statistics folded into the canonical node and the child
/// edge repointed, then the node's own signature is registered.
fn canonicalize(nodes: &mut [Node]) {
    let mut canonical: HashMap<Signature, NodeId> = HashMap::new();
    // Pre-merge each node has exactly one parent, so each id is pushed
    // and resolved exactly once.
    let mut resolved: HashMap<NodeId, NodeId> = HashMap::new();

    let mut stack = vec![Frame {
        id: NodeId::ROOT,
        entries: nodes[NodeId::ROOT.index()].children().collect(),
        next: 0,
    }];

    while let Some(top) = stack.last_mut() {
        if top.next < top.entries.len() {
            let (_, child) = top.entries[top.next];
            top.next += 1;
            stack.push(Frame {
                id: child,
                entries: nodes[child.index()].children().collect(),
                next: 0,
            });
            continue;
        }

        let Some(frame) = stack.pop() else { break };
        for &(token, child) in &frame.entries {
            let canon = resolved[&child];
            if canon != child {
                let duplicate = nodes[child.index()].clone();
                nodes[canon.index()].absorb_stats(&duplicate);
                nodes[frame.id.index()].set_child(token, canon);
            }
        }

        let canon_id = if frame.id == NodeId::ROOT {
            // The root has no shared-suffix semantics.
            frame.id
        } else {
            let sig = Signature {
                token_id: nodes[frame.id.index()].token_id(),
                children: nodes[frame.id.index()].children().collect(),
            };
            *canonical.entry(sig).or_insert(frame.id)
        };
        resolved.insert(frame.id, canon_id);
    }
}

/// Rebuild the arena with only the nodes reachable from the root,
/// remapping ids to a dense breadth-first numbering.
fn compact(nodes: &mut Vec<Node>) {
    let mut remap: HashMap<NodeId, NodeId> = HashMap::new();
    let mut order: Vec<NodeId> = Vec::new();
    let mut queue = VecDeque::from([NodeId::ROOT]);
    remap.insert(NodeId::ROOT, NodeId::ROOT);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for (_, child) in nodes[id.index()].children() {
            if !remap.contains_key(&child) {
                remap.insert(child, NodeId(remap.len() as u32));
                queue.push_back(child);
            }
        }
    }

    let mut compacted = Vec::with_capacity(order.len());
    for id in order {
        let mut node = std::mem::replace(&mut nodes[id.index()], Node::root());
        node.remap_children(|c| remap[&c]);
        compacted.push(node);
    }
    *nodes = compacted;
}

#[cfg(test)]
mod tests {
    use crate::tree::{CompletionTree, NodeId, TokenId};

    fn follow(tree: &CompletionTree, path: &[TokenId]) -> NodeId {
        let mut id = NodeId::ROOT;
        for &t in path {
            id = tree.get(id).unwrap().child(t).unwrap();
        }
        id
    }

    #[test]
    fn shared_suffix_collapses_into_one_subtree() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 2, 3], vec![4, 2, 3]])
            .build()
            .unwrap();

        // Root, 1, 4, shared 2, shared 3.
        assert_eq!(tree.node_count(), 5);

        let via_one = follow(&tree, &[1, 2]);
        let via_four = follow(&tree, &[4, 2]);
        assert_eq!(via_one, via_four);

        let shared = tree.get(via_one).unwrap();
        assert_eq!(shared.pass_count(), 2);

        let one = tree.get(follow(&tree, &[1])).unwrap();
        let four = tree.get(follow(&tree, &[4])).unwrap();
        assert_eq!(one.pass_count(), 1);
        assert_eq!(four.pass_count(), 1);

        let tail = tree.get(follow(&tree, &[1, 2, 3])).unwrap();
        assert_eq!(tail.pass_count(), 2);
        assert_eq!(tail.leaf_count(), 2);
    }

    #[test]
    fn three_way_suffix_merge_sums_statistics() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 9, 9], vec![2, 9, 9], vec![3, 9, 9]])
            .scores(vec![1.0, 0.5, 0.0])
            .build()
            .unwrap();

        let shared = tree.get(follow(&tree, &[1, 9])).unwrap();
        assert_eq!(shared.pass_count(), 3);
        assert_eq!(shared.score_count(), 3);
        assert!((shared.score_sum() - 1.5).abs() < 1e-12);
        assert_eq!(shared.mean_score(), Some(0.5));

        // Root + three heads + two shared tail nodes.
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn distinct_suffixes_stay_separate() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 2, 3], vec![4, 2, 5]])
            .build()
            .unwrap();

        assert_ne!(follow(&tree, &[1, 2]), follow(&tree, &[4, 2]));
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn disabling_merge_keeps_the_plain_trie() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 2, 3], vec![4, 2, 3]])
            .merge_suffixes(false)
            .build()
            .unwrap();

        assert_eq!(tree.node_count(), 7);
        assert_ne!(follow(&tree, &[1, 2]), follow(&tree, &[4, 2]));
    }

    #[test]
    fn leaf_flagged_suffixes_merge_with_summed_leaves() {
        // Structural identity ignores leaf/score statistics; they sum.
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 7], vec![2, 7]])
            .scores(vec![1.0, 0.0])
            .build()
            .unwrap();

        let shared = tree.get(follow(&tree, &[1, 7])).unwrap();
        assert_eq!(follow(&tree, &[1, 7]), follow(&tree, &[2, 7]));
        assert_eq!(shared.leaf_count(), 2);
        assert_eq!(shared.pass_count(), 2);
        assert_eq!(shared.mean_score(), Some(0.5));
    }

    #[test]
    fn identical_completions_do_not_merge_through_root() {
        // Superimposed paths never create duplicates, so the only
        // candidate signature match would be the root itself, which is
        // exempt.
        let tree = CompletionTree::builder()
            .completions(vec![vec![8], vec![8]])
            .build()
            .unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.get(NodeId::ROOT).unwrap().pass_count(), 2);
    }

    #[test]
    fn very_long_completions_merge_without_overflowing() {
        // Deeper than any thread stack would allow a recursive
        // post-order pass: two 200k-token completions sharing their
        // suffix after the first token.
        let len = 200_000u32;
        let a: Vec<TokenId> = std::iter::once(1).chain(10..10 + len).collect();
        let b: Vec<TokenId> = std::iter::once(2).chain(10..10 + len).collect();

        let tree = CompletionTree::builder()
            .completions(vec![a, b])
            .build()
            .unwrap();

        // Root, the two heads, one shared tail.
        assert_eq!(tree.node_count(), 3 + len as usize);
        let shared = follow(&tree, &[1, 10]);
        assert_eq!(shared, follow(&tree, &[2, 10]));
        assert_eq!(tree.get(shared).unwrap().pass_count(), 2);
    }

    #[test]
    fn compaction_drops_orphaned_nodes() {
        let tree = CompletionTree::builder()
            .completions(vec![vec![1, 2, 3, 4], vec![5, 2, 3, 4], vec![6, 2, 3, 4]])
            .build()
            .unwrap();

        // Every remaining arena slot is reachable from the root.
        let reachable = tree.walk().count();
        assert_eq!(reachable, tree.node_count());
        assert_eq!(tree.node_count(), 7);
    }
}
