// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification hook for state mutations.

use crate::{Icon, IconState, NodeId};

/// A single icon state change on one node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StateChange<'a> {
    /// The node whose state changed.
    pub node: NodeId,
    /// The node's full path.
    pub path: &'a str,
    /// Which icon changed.
    pub icon: Icon,
    /// The new state.
    pub state: IconState,
    /// Whether the node is a leaf.
    pub is_leaf: bool,
}

/// Receives every state change made by a toggle or bulk restore.
///
/// The tree calls this once per node and icon whose value actually changed,
/// including branches updated by upward propagation. Rendering layers use it to
/// mark representations dirty; scene layers forward the leaf changes.
///
/// Implemented for [`IgnoreChanges`] and for any `FnMut(StateChange<'_>)`.
pub trait StateObserver {
    /// Called after `change.node`'s `change.icon` was set to `change.state`.
    fn state_changed(&mut self, change: StateChange<'_>);
}

/// An observer that discards every change.
#[derive(Copy, Clone, Debug, Default)]
pub struct IgnoreChanges;

impl StateObserver for IgnoreChanges {
    fn state_changed(&mut self, _change: StateChange<'_>) {}
}

impl<F> StateObserver for F
where
    F: FnMut(StateChange<'_>),
{
    fn state_changed(&mut self, change: StateChange<'_>) {
        self(change);
    }
}
