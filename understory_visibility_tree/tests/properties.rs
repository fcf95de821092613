// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for aggregation and propagation over random trees.

use proptest::prelude::*;
use understory_visibility_tree::IconState::{Disabled, Mixed, Selected, Unselected};
use understory_visibility_tree::{
    Icon, IconState, IgnoreChanges, NestedVisibilityData, NodeId, StateChange, TreeOptions,
    VisibilityTree,
};

fn icon_state() -> impl Strategy<Value = IconState> {
    prop_oneof![Just(Unselected), Just(Selected), Just(Mixed), Just(Disabled)]
}

fn subtree() -> impl Strategy<Value = NestedVisibilityData> {
    let leaf = (icon_state(), icon_state()).prop_map(|(shape, edges)| NestedVisibilityData::leaf(shape, edges));
    leaf.prop_recursive(4, 64, 5, |inner| {
        prop::collection::vec(inner, 1..5).prop_map(named)
    })
}

fn named(children: Vec<NestedVisibilityData>) -> NestedVisibilityData {
    NestedVisibilityData::branch(
        children
            .into_iter()
            .enumerate()
            .map(|(index, child)| (format!("n{index}"), child)),
    )
}

fn tree() -> impl Strategy<Value = VisibilityTree> {
    (prop::collection::vec(subtree(), 1..6), any::<bool>()).prop_map(|(children, linked)| {
        VisibilityTree::build(&named(children), TreeOptions::new().with_linked_icons(linked))
    })
}

fn toggles() -> impl Strategy<Value = Vec<(usize, bool, Option<bool>)>> {
    prop::collection::vec((any::<usize>(), any::<bool>(), any::<Option<bool>>()), 0..24)
}

fn pick(tree: &VisibilityTree, selector: usize) -> NodeId {
    let nth = selector % tree.node_count();
    tree.subtree(tree.root()).nth(nth).unwrap()
}

fn icon(edges: bool) -> Icon {
    if edges { Icon::Edges } else { Icon::Shape }
}

fn snapshot(tree: &VisibilityTree) -> Vec<[IconState; 2]> {
    tree.subtree(tree.root()).map(|id| tree.node(id).state()).collect()
}

fn assert_aggregates(tree: &VisibilityTree) -> Result<(), TestCaseError> {
    for id in tree.subtree(tree.root()) {
        let Some(children) = tree.node(id).children() else {
            continue;
        };
        for icon in Icon::ALL {
            let expected = IconState::aggregate(children.iter().map(|c| tree.node(*c).icon_state(icon)));
            prop_assert_eq!(tree.node(id).icon_state(icon), expected, "{}", tree.node(id).path());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn built_branches_match_their_children(tree in tree()) {
        assert_aggregates(&tree)?;
        prop_assert_eq!(tree.first_inconsistency(), None);
    }

    #[test]
    fn toggles_never_drift(mut tree in tree(), ops in toggles()) {
        for (selector, edges, force) in ops {
            let id = pick(&tree, selector);
            tree.toggle_node_state(id, icon(edges), force, &mut IgnoreChanges);
        }
        assert_aggregates(&tree)?;
    }

    #[test]
    fn forcing_on_is_idempotent(mut tree in tree(), selector in any::<usize>(), edges in any::<bool>()) {
        let id = pick(&tree, selector);
        tree.toggle_node_state(id, icon(edges), Some(true), &mut IgnoreChanges);
        let once = snapshot(&tree);
        prop_assert!(!tree.toggle_node_state(id, icon(edges), Some(true), &mut IgnoreChanges));
        prop_assert_eq!(snapshot(&tree), once);
    }

    #[test]
    fn forcing_a_branch_reaches_every_enabled_leaf(mut tree in tree(), selector in any::<usize>(), edges in any::<bool>()) {
        let id = pick(&tree, selector);
        let icon = icon(edges);
        tree.toggle_node_state(id, icon, Some(true), &mut IgnoreChanges);
        for node in tree.subtree(id) {
            let state = tree.node(node).icon_state(icon);
            prop_assert!(state == Selected || state == Disabled);
        }
    }

    #[test]
    fn restoring_own_states_is_silent(mut tree in tree(), ops in toggles()) {
        for (selector, edges, force) in ops {
            let id = pick(&tree, selector);
            tree.toggle_node_state(id, icon(edges), force, &mut IgnoreChanges);
        }
        let before = snapshot(&tree);
        let mut events = 0_usize;
        let changed = tree.set_states(tree.states(), &mut |_: StateChange<'_>| events += 1);
        prop_assert!(!changed);
        prop_assert_eq!(events, 0);
        prop_assert_eq!(snapshot(&tree), before);
    }

    #[test]
    fn disabled_icons_stay_disabled(mut tree in tree(), ops in toggles()) {
        let disabled: Vec<(NodeId, Icon)> = tree
            .subtree(tree.root())
            .flat_map(|id| Icon::ALL.map(|icon| (id, icon)))
            .filter(|(id, icon)| tree.node(*id).icon_state(*icon) == Disabled)
            .collect();
        for (id, icon) in &disabled {
            let before = snapshot(&tree);
            prop_assert!(!tree.toggle_node_state(*id, *icon, None, &mut IgnoreChanges));
            prop_assert_eq!(snapshot(&tree), before);
        }
        for (selector, edges, force) in ops {
            let id = pick(&tree, selector);
            tree.toggle_node_state(id, icon(edges), force, &mut IgnoreChanges);
        }
        for (id, icon) in disabled {
            prop_assert_eq!(tree.node(id).icon_state(icon), Disabled);
        }
    }
}
