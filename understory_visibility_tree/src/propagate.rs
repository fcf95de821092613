// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State mutation with downward and upward propagation.

use alloc::vec;

use crate::{
    Icon, IconState, NodeId, StateAction, StateChange, StateObserver, TreeError, VisibilityTree,
};

impl VisibilityTree {
    /// Toggles or forces one icon of a node.
    ///
    /// With `force` set the icon becomes `Selected`/`Unselected`; without it
    /// the current value is flipped (`Mixed` resolves to `Selected`). The new
    /// value is pushed down to every non-disabled descendant, then ancestors
    /// are recomputed from their children until one does not change.
    ///
    /// When [`TreeOptions::linked_icons`](crate::TreeOptions::linked_icons) is
    /// set and `icon` is [`Icon::Shape`], the edge icon receives the same value
    /// (skipped where edges are disabled).
    ///
    /// A disabled target is left untouched. `observer` sees every node and
    /// icon whose value changed. Returns `true` if anything changed.
    pub fn toggle_node_state<O>(
        &mut self,
        id: NodeId,
        icon: Icon,
        force: Option<bool>,
        observer: &mut O,
    ) -> bool
    where
        O: StateObserver + ?Sized,
    {
        let current = self.node(id).icon_state(icon);
        if current.is_disabled() {
            tracing::trace!(path = self.node(id).path(), ?icon, "toggle ignored on disabled icon");
            return false;
        }
        let target = force.map_or(current.toggled(), IconState::from_visible);
        let mut changed = self.assign(id, icon, target, observer);
        if icon == Icon::Shape && self.options.linked_icons {
            changed |= self.assign(id, Icon::Edges, target, observer);
        }
        tracing::debug!(path = self.node(id).path(), ?icon, %target, changed, "toggled node state");
        changed
    }

    /// Hides everything under the root.
    ///
    /// Forces the root's shape icon; if every shape is disabled (an edge-only
    /// assembly) the edge icon is forced instead.
    pub fn hide_all<O>(&mut self, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        self.force_node(NodeId::ROOT, false, observer)
    }

    /// Shows everything under the root. See [`VisibilityTree::hide_all`].
    pub fn show_all<O>(&mut self, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        self.force_node(NodeId::ROOT, true, observer)
    }

    /// Shows the node at `path`. Returns `false` if nothing changed or the
    /// path does not resolve.
    pub fn show<O>(&mut self, path: &str, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        self.find_node_by_path(path)
            .is_some_and(|id| self.force_node(id, true, observer))
    }

    /// Hides the node at `path`. Returns `false` if nothing changed or the
    /// path does not resolve.
    pub fn hide<O>(&mut self, path: &str, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        self.find_node_by_path(path)
            .is_some_and(|id| self.force_node(id, false, observer))
    }

    /// Applies a named action (`"show"`, `"hide"`, `"toggle"`) to one icon of
    /// the node at `path`.
    ///
    /// Unknown actions and icon indices are reported as errors. An unresolved
    /// path is not an error and yields `Ok(false)`.
    pub fn apply_action<O>(
        &mut self,
        path: &str,
        icon: usize,
        action: &str,
        observer: &mut O,
    ) -> Result<bool, TreeError>
    where
        O: StateObserver + ?Sized,
    {
        let action: StateAction = action.parse().inspect_err(|err| {
            tracing::warn!(%err, "rejected state action");
        })?;
        let icon = Icon::try_from(icon).inspect_err(|err| {
            tracing::warn!(%err, "rejected state action");
        })?;
        let Some(id) = self.find_node_by_path(path) else {
            tracing::warn!(path, "state action on unknown path");
            return Ok(false);
        };
        Ok(self.toggle_node_state(id, icon, action.force(), observer))
    }

    /// Restores leaf states previously exported with
    /// [`VisibilityTree::states`].
    ///
    /// Each icon is applied on its own, without icon linking, and only
    /// `Selected`/`Unselected` targets are honored. Paths that do not resolve
    /// to a leaf are skipped with a warning. Returns `true` if anything
    /// changed.
    pub fn set_states<I, K, O>(&mut self, states: I, observer: &mut O) -> bool
    where
        I: IntoIterator<Item = (K, [IconState; 2])>,
        K: AsRef<str>,
        O: StateObserver + ?Sized,
    {
        let mut changed = false;
        for (path, pair) in states {
            let path = path.as_ref();
            let Some(id) = self.find_node_by_path(path) else {
                tracing::warn!(path, "skipping state for unknown path");
                continue;
            };
            if !self.is_leaf(id) {
                tracing::warn!(path, "skipping state for a branch");
                continue;
            }
            for icon in Icon::ALL {
                let target = pair[icon.index()];
                if matches!(target, IconState::Selected | IconState::Unselected) {
                    changed |= self.assign(id, icon, target, observer);
                }
            }
        }
        tracing::debug!(changed, "restored leaf states");
        changed
    }

    fn force_node<O>(&mut self, id: NodeId, visible: bool, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        let icon = if self.node(id).icon_state(Icon::Shape).is_disabled() {
            Icon::Edges
        } else {
            Icon::Shape
        };
        self.toggle_node_state(id, icon, Some(visible), observer)
    }

    /// Sets `icon` to `target` on `id` and its non-disabled descendants, then
    /// re-aggregates ancestors.
    fn assign<O>(&mut self, id: NodeId, icon: Icon, target: IconState, observer: &mut O) -> bool
    where
        O: StateObserver + ?Sized,
    {
        if self.node(id).icon_state(icon).is_disabled() {
            return false;
        }

        let mut changed = false;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.index()];
            let state = &mut node.state[icon.index()];
            if !state.is_disabled() && *state != target {
                *state = target;
                changed = true;
                observer.state_changed(StateChange {
                    node: current,
                    path: &node.path,
                    icon,
                    state: target,
                    is_leaf: node.is_leaf(),
                });
            }
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev().copied());
            }
        }
        if changed {
            self.propagate_up(id, icon, observer);
        }
        changed
    }

    fn propagate_up<O>(&mut self, id: NodeId, icon: Icon, observer: &mut O)
    where
        O: StateObserver + ?Sized,
    {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            let node = self.node(parent);
            let aggregated = IconState::aggregate(
                self.children(parent)
                    .iter()
                    .map(|child| self.node(*child).icon_state(icon)),
            );
            if aggregated == node.icon_state(icon) {
                break;
            }
            self.set_state(parent, icon, aggregated);
            let node = self.node(parent);
            observer.state_changed(StateChange {
                node: parent,
                path: node.path(),
                icon,
                state: aggregated,
                is_leaf: false,
            });
            current = self.parent(parent);
        }
    }
}
