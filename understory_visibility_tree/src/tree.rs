// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree storage, construction, path lookup, and traversal.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::{Icon, IconState, NestedVisibilityData, NodeKind, TreeOptions};

/// Index of a node inside its [`VisibilityTree`].
///
/// Ids are assigned in depth-first pre-order, so the root is always
/// [`NodeId::ROOT`] and every child has a larger id than its parent. Ids are
/// only meaningful for the tree that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the id as a dense index, suitable for side tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "Assemblies with more than u32::MAX nodes are not supported"
    )]
    fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// One assembly item or leaf shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    pub(crate) path: String,
    level: usize,
    pub(crate) state: [IconState; 2],
    children: Option<Vec<NodeId>>,
    expanded: bool,
}

impl TreeNode {
    /// Local name, unique among siblings. Empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full `/`-separated path without a leading slash. Empty for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Depth from the root (root is `0`).
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The `[shape, edges]` state pair.
    #[must_use]
    pub fn state(&self) -> [IconState; 2] {
        self.state
    }

    /// The state of one icon.
    #[must_use]
    pub fn icon_state(&self, icon: Icon) -> IconState {
        self.state[icon.index()]
    }

    /// Child ids in display order, or `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// Returns `true` if the node has no children mapping.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Leaf or branch.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        if self.is_leaf() {
            NodeKind::Leaf
        } else {
            NodeKind::Node
        }
    }

    /// Expansion flag; `None` for leaves.
    #[must_use]
    pub fn expanded(&self) -> Option<bool> {
        self.children.as_ref().map(|_| self.expanded)
    }
}

/// The canonical visibility state of an assembly.
///
/// Nodes are never added or removed after [`VisibilityTree::build`]; only
/// their icon states and expansion flags change.
#[derive(Clone, Debug)]
pub struct VisibilityTree {
    pub(crate) nodes: Vec<TreeNode>,
    index: HashMap<String, NodeId>,
    max_level: usize,
    expansion_revision: u64,
    pub(crate) options: TreeOptions,
}

impl VisibilityTree {
    /// Builds a tree from nested visibility data.
    ///
    /// Never fails: an empty branch is coerced to a disabled leaf, and entries
    /// whose name would make their path ambiguous (a `/` in the name or a
    /// duplicate sibling name) are skipped with a warning. Every branch state
    /// is computed from its children with [`IconState::aggregate`].
    ///
    /// Construction uses an explicit work stack, so arbitrarily deep input
    /// cannot overflow the call stack.
    #[must_use]
    pub fn build(data: &NestedVisibilityData, options: TreeOptions) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            max_level: 0,
            expansion_revision: 0,
            options,
        };

        let mut stack: Vec<(Option<NodeId>, &str, &NestedVisibilityData, usize)> =
            vec![(None, "", data, 0)];
        while let Some((parent, name, value, level)) = stack.pop() {
            let path = match parent {
                None => String::new(),
                Some(parent) => {
                    if name.contains('/') {
                        tracing::warn!(name, "skipping node whose name contains `/`");
                        continue;
                    }
                    join_path(&tree.nodes[parent.index()].path, name)
                }
            };
            if tree.index.contains_key(&path) {
                tracing::warn!(path = path.as_str(), "skipping duplicate sibling name");
                continue;
            }

            let id = NodeId::from_index(tree.nodes.len());
            let (state, children) = match value {
                NestedVisibilityData::Leaf(state) => (*state, None),
                NestedVisibilityData::Branch(entries) if entries.is_empty() => {
                    tracing::warn!(path = path.as_str(), "empty branch coerced to a disabled leaf");
                    ([IconState::Disabled; 2], None)
                }
                NestedVisibilityData::Branch(entries) => {
                    // Reversed so the first entry is popped (and numbered) first.
                    for (child_name, child) in entries.iter().rev() {
                        stack.push((Some(id), child_name.as_str(), child, level + 1));
                    }
                    ([IconState::Disabled; 2], Some(Vec::with_capacity(entries.len())))
                }
            };

            if let Some(parent) = parent
                && let Some(siblings) = tree.nodes[parent.index()].children.as_mut()
            {
                siblings.push(id);
            }
            tree.max_level = tree.max_level.max(level);
            tree.index.insert(path.clone(), id);
            tree.nodes.push(TreeNode {
                name: name.into(),
                path,
                level,
                state,
                children,
                expanded: false,
            });
        }

        // Pre-order ids: walking backwards visits every child before its parent.
        for index in (0..tree.nodes.len()).rev() {
            let Some(children) = tree.nodes[index].children.as_deref() else {
                continue;
            };
            let state = tree.aggregate_children(children);
            tree.nodes[index].state = state;
        }

        tracing::debug!(
            nodes = tree.nodes.len(),
            max_level = tree.max_level,
            "built visibility tree"
        );
        tree
    }

    /// The options this tree was built with.
    #[must_use]
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Total number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Deepest level seen during construction.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// All node ids in depth-first pre-order.
    ///
    /// Reversing the iterator visits every child before its parent.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + use<> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    /// Returns the node for `id`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.index())
    }

    /// Child ids of `id` in display order; empty for leaves.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children().unwrap_or(&[])
    }

    /// Returns `true` if `id` is a leaf.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// Leaf or branch.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    /// Resolves a path to a node.
    ///
    /// A single leading `/` is accepted and ignored; the empty path is the
    /// root. Returns `None` for anything that does not resolve.
    #[must_use]
    pub fn find_node_by_path(&self, path: &str) -> Option<NodeId> {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.index.get(path).copied()
    }

    /// Returns the parent of `id`, or `None` for the root.
    ///
    /// Nodes do not store parent links; the parent is re-resolved from the
    /// path with its last segment trimmed.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let path = self.get(id)?.path();
        if path.is_empty() {
            return None;
        }
        match path.rfind('/') {
            Some(split) => self.find_node_by_path(&path[..split]),
            None => Some(NodeId::ROOT),
        }
    }

    /// Iterates the subtree rooted at `id` in depth-first pre-order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Subtree<'_> {
        Subtree {
            tree: self,
            stack: vec![id],
        }
    }

    /// Calls `f` for every node of the subtree rooted at `id`, in
    /// depth-first pre-order.
    pub fn traverse<F>(&self, id: NodeId, mut f: F)
    where
        F: FnMut(NodeId, &TreeNode),
    {
        for child in self.subtree(id) {
            f(child, self.node(child));
        }
    }

    /// Returns the expansion flag of `id`, or `None` for leaves.
    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> Option<bool> {
        self.node(id).expanded()
    }

    /// Counter bumped whenever any expansion flag changes.
    ///
    /// Presentation layers compare it against the value they last saw to
    /// decide whether their row layout needs reconciling.
    #[must_use]
    pub fn expansion_revision(&self) -> u64 {
        self.expansion_revision
    }

    /// Sets the expansion flag of a branch. Returns `false` for leaves.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let node = &mut self.nodes[id.index()];
        if node.is_leaf() {
            return false;
        }
        if node.expanded != expanded {
            node.expanded = expanded;
            self.expansion_revision = self.expansion_revision.wrapping_add(1);
        }
        true
    }

    /// Flips the expansion flag of a branch, returning the new value.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Option<bool> {
        let expanded = !self.is_expanded(id)?;
        self.set_expanded(id, expanded);
        Some(expanded)
    }

    /// Sets the expansion flag of every branch for a target depth.
    ///
    /// A branch is expanded when its level is below `level`. Level `-1` is
    /// "smart expand": every branch expands unless it has exactly one child
    /// and that child is a leaf. The rule looks one level down only.
    pub fn set_expanded_level(&mut self, level: i32) {
        for index in 0..self.nodes.len() {
            let Some(children) = self.nodes[index].children.as_deref() else {
                continue;
            };
            let expanded = if level == -1 {
                !(children.len() == 1 && self.node(children[0]).is_leaf())
            } else {
                i64::try_from(self.nodes[index].level).is_ok_and(|l| l < i64::from(level))
            };
            self.nodes[index].expanded = expanded;
        }
        self.expansion_revision = self.expansion_revision.wrapping_add(1);
        tracing::debug!(level, "set expanded level");
    }

    /// Expands the root, every ancestor of `path`, and the node itself.
    ///
    /// Returns `false` (after expanding the prefix that did resolve) if any
    /// segment does not resolve.
    pub fn expand_path(&mut self, path: &str) -> bool {
        self.set_expanded(NodeId::ROOT, true);
        let path = path.strip_prefix('/').unwrap_or(path);
        if path.is_empty() {
            return true;
        }
        for (end, _) in path
            .match_indices('/')
            .chain(core::iter::once((path.len(), "")))
        {
            let Some(id) = self.find_node_by_path(&path[..end]) else {
                return false;
            };
            self.set_expanded(id, true);
        }
        true
    }

    /// Collapses the node at `path`. Returns `false` if it does not resolve.
    pub fn collapse_path(&mut self, path: &str) -> bool {
        match self.find_node_by_path(path) {
            Some(id) => {
                self.set_expanded(id, false);
                true
            }
            None => false,
        }
    }

    /// Exports the state pair of every leaf, keyed by path.
    #[must_use]
    pub fn states(&self) -> BTreeMap<String, [IconState; 2]> {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| (node.path.clone(), node.state))
            .collect()
    }

    /// Returns the first branch whose stored state differs from the aggregate
    /// of its children, or `None` if the whole tree is consistent.
    #[must_use]
    pub fn first_inconsistency(&self) -> Option<NodeId> {
        (0..self.nodes.len()).rev().find_map(|index| {
            let children = self.nodes[index].children.as_deref()?;
            (self.aggregate_children(children) != self.nodes[index].state)
                .then(|| NodeId::from_index(index))
        })
    }

    pub(crate) fn aggregate_children(&self, children: &[NodeId]) -> [IconState; 2] {
        Icon::ALL.map(|icon| {
            IconState::aggregate(children.iter().map(|child| self.node(*child).icon_state(icon)))
        })
    }

    pub(crate) fn set_state(&mut self, id: NodeId, icon: Icon, state: IconState) {
        self.nodes[id.index()].state[icon.index()] = state;
    }
}

/// Depth-first pre-order iterator over a subtree.
///
/// Created by [`VisibilityTree::subtree`].
#[derive(Clone, Debug)]
pub struct Subtree<'a> {
    tree: &'a VisibilityTree,
    stack: Vec<NodeId>,
}

impl Iterator for Subtree<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(children) = self.tree.get(id).and_then(TreeNode::children) {
            self.stack.extend(children.iter().rev().copied());
        }
        Some(id)
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        String::from(name)
    } else {
        let mut path = String::with_capacity(parent.len() + 1 + name.len());
        path.push_str(parent);
        path.push('/');
        path.push_str(name);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IconState::{Disabled, Mixed, Selected, Unselected};

    fn sample() -> VisibilityTree {
        let data = NestedVisibilityData::branch([
            (
                "a",
                NestedVisibilityData::branch([
                    ("x", NestedVisibilityData::leaf(Selected, Selected)),
                    ("y", NestedVisibilityData::leaf(Unselected, Selected)),
                ]),
            ),
            ("b", NestedVisibilityData::leaf(Disabled, Selected)),
        ]);
        VisibilityTree::build(&data, TreeOptions::default())
    }

    #[test]
    fn ids_are_pre_order_and_paths_are_joined() {
        let tree = sample();
        let paths: Vec<&str> = tree.subtree(tree.root()).map(|id| tree.node(id).path()).collect();
        assert_eq!(paths, ["", "a", "a/x", "a/y", "b"]);
        let ids: Vec<usize> = tree.subtree(tree.root()).map(NodeId::index).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn branch_states_are_aggregated() {
        let tree = sample();
        let a = tree.find_node_by_path("a").unwrap();
        assert_eq!(tree.node(a).state(), [Mixed, Selected]);
        assert_eq!(tree.node(tree.root()).state(), [Mixed, Selected]);
        assert_eq!(tree.first_inconsistency(), None);
    }

    #[test]
    fn parent_is_derived_from_path() {
        let tree = sample();
        let x = tree.find_node_by_path("a/x").unwrap();
        let a = tree.find_node_by_path("a").unwrap();
        assert_eq!(tree.parent(x), Some(a));
        assert_eq!(tree.parent(a), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn unresolved_paths_are_none() {
        let tree = sample();
        assert_eq!(tree.find_node_by_path("a/z"), None);
        assert_eq!(tree.find_node_by_path("/a/x"), tree.find_node_by_path("a/x"));
        assert_eq!(tree.find_node_by_path(""), Some(tree.root()));
    }

    #[test]
    fn empty_branch_becomes_disabled_leaf() {
        let data = NestedVisibilityData::branch([
            ("solid", NestedVisibilityData::leaf(Selected, Selected)),
            ("ghost", NestedVisibilityData::Branch(Vec::new())),
        ]);
        let tree = VisibilityTree::build(&data, TreeOptions::default());
        let ghost = tree.find_node_by_path("ghost").unwrap();
        assert!(tree.is_leaf(ghost));
        assert_eq!(tree.node(ghost).state(), [Disabled, Disabled]);
        assert_eq!(tree.node(tree.root()).state(), [Selected, Selected]);
    }

    #[test]
    fn duplicate_and_slashed_names_are_skipped() {
        let data = NestedVisibilityData::branch([
            ("p", NestedVisibilityData::leaf(Selected, Selected)),
            ("p", NestedVisibilityData::leaf(Unselected, Unselected)),
            ("q/r", NestedVisibilityData::leaf(Unselected, Unselected)),
        ]);
        let tree = VisibilityTree::build(&data, TreeOptions::default());
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.node(tree.root()).state(), [Selected, Selected]);
    }

    #[test]
    fn smart_expand_skips_single_leaf_branches() {
        let data = NestedVisibilityData::branch([
            (
                "wrapper",
                NestedVisibilityData::branch([("only", NestedVisibilityData::leaf(Selected, Selected))]),
            ),
            (
                "chain",
                NestedVisibilityData::branch([(
                    "inner",
                    NestedVisibilityData::branch([("leaf", NestedVisibilityData::leaf(Selected, Selected))]),
                )]),
            ),
        ]);
        let mut tree = VisibilityTree::build(&data, TreeOptions::default());
        tree.set_expanded_level(-1);
        let expanded = |tree: &VisibilityTree, path: &str| {
            tree.is_expanded(tree.find_node_by_path(path).unwrap())
        };
        assert_eq!(expanded(&tree, ""), Some(true));
        assert_eq!(expanded(&tree, "wrapper"), Some(false));
        // One-level rule: a single branch child still expands.
        assert_eq!(expanded(&tree, "chain"), Some(true));
        assert_eq!(expanded(&tree, "chain/inner"), Some(false));
        assert_eq!(expanded(&tree, "chain/inner/leaf"), None);
    }

    #[test]
    fn expanded_level_expands_branches_above_depth() {
        let mut tree = sample();
        tree.set_expanded_level(1);
        assert_eq!(tree.is_expanded(tree.root()), Some(true));
        assert_eq!(tree.is_expanded(tree.find_node_by_path("a").unwrap()), Some(false));
        tree.set_expanded_level(0);
        assert_eq!(tree.is_expanded(tree.root()), Some(false));
    }

    #[test]
    fn expansion_changes_bump_revision() {
        let mut tree = sample();
        let before = tree.expansion_revision();
        tree.set_expanded(tree.root(), false);
        assert_eq!(tree.expansion_revision(), before);
        tree.set_expanded(tree.root(), true);
        assert_eq!(tree.expansion_revision(), before + 1);
        assert!(!tree.set_expanded(tree.find_node_by_path("b").unwrap(), true));
        assert_eq!(tree.expansion_revision(), before + 1);
    }

    #[test]
    fn expand_and_collapse_path() {
        let mut tree = sample();
        assert!(tree.expand_path("a/x"));
        assert_eq!(tree.is_expanded(tree.root()), Some(true));
        assert_eq!(tree.is_expanded(tree.find_node_by_path("a").unwrap()), Some(true));
        assert!(tree.collapse_path("a"));
        assert_eq!(tree.is_expanded(tree.find_node_by_path("a").unwrap()), Some(false));
        assert!(!tree.expand_path("a/missing"));
        assert!(!tree.collapse_path("nowhere"));
    }

    #[test]
    fn deep_chain_builds_without_recursion() {
        let mut data = NestedVisibilityData::leaf(Selected, Unselected);
        for depth in 0..10_000 {
            data = NestedVisibilityData::Branch(vec![(alloc::format!("n{depth}"), data)]);
        }
        let tree = VisibilityTree::build(&data, TreeOptions::default());
        assert_eq!(tree.max_level(), 10_000);
        assert_eq!(tree.node(tree.root()).state(), [Selected, Unselected]);
        assert_eq!(tree.subtree(tree.root()).count(), 10_001);
    }
}
