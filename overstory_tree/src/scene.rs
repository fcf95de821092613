// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator interfaces toward the 3D scene.

use alloc::string::String;

use understory_visibility_tree::{Icon, IconState, NodeKind, StateChange, StateObserver};

bitflags::bitflags! {
    /// Keyboard modifiers held during a label click.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// The meta (command / windows) key.
        const META  = 0b0000_0001;
        /// The shift key.
        const SHIFT = 0b0000_0010;
    }
}

/// A leaf whose shape or edge visibility changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ObjectChange<'a> {
    /// Path of the leaf shape.
    pub path: &'a str,
    /// Which icon changed.
    pub icon: Icon,
    /// Whether the shape or edges are now shown.
    pub visible: bool,
    /// `true` for user-initiated toggles, `false` for bulk restores.
    pub notify: bool,
    /// Whether the scene should re-render right away. Always `false` during
    /// propagation; [`SceneHandler::scene_updated`] follows once instead.
    pub update: bool,
}

/// A label click, forwarded to the scene's picking logic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pick<'a> {
    /// Path of the clicked node's parent (empty for top-level nodes).
    pub parent_path: &'a str,
    /// Local name of the clicked node.
    pub name: &'a str,
    /// Modifiers held during the click.
    pub modifiers: Modifiers,
    /// Leaf or branch.
    pub kind: NodeKind,
    /// `true` when the pick originated in the tree rather than the viewport.
    pub from_tree: bool,
}

/// The scene-side collaborator an [`AssemblyTree`](crate::AssemblyTree)
/// reports to.
pub trait SceneHandler {
    /// A leaf changed visibility. Called once per changed leaf and icon.
    fn object_changed(&mut self, change: ObjectChange<'_>);

    /// A label was clicked.
    fn pick(&mut self, pick: Pick<'_>);

    /// A toggle or bulk operation finished and changed something.
    fn scene_updated(&mut self);

    /// Optional color swatch for the row at `path`.
    fn node_color(&self, path: &str) -> Option<String> {
        let _ = path;
        None
    }
}

/// Forwards leaf state changes from the model to a [`SceneHandler`].
#[derive(Debug)]
pub(crate) struct SceneForwarder<'a, S: ?Sized> {
    pub(crate) scene: &'a mut S,
    pub(crate) notify: bool,
    pub(crate) leaves: usize,
}

impl<S: SceneHandler + ?Sized> StateObserver for SceneForwarder<'_, S> {
    fn state_changed(&mut self, change: StateChange<'_>) {
        if !change.is_leaf {
            return;
        }
        self.leaves += 1;
        self.scene.object_changed(ObjectChange {
            path: change.path,
            icon: change.icon,
            visible: change.state == IconState::Selected,
            notify: self.notify,
            update: false,
        });
    }
}
