// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembly tree surface: model, view, and scene wired together.

use alloc::collections::BTreeMap;
use alloc::string::String;

use understory_virtual_tree::{RowHost, UpdateStats, VirtualTreeView};
use understory_visibility_tree::{Icon, IconState, NestedVisibilityData, TreeError, VisibilityTree};

use crate::scene::SceneForwarder;
use crate::{AssemblyTreeOptions, ColoredRows, Modifiers, Pick, SceneHandler, TreeEvent};

/// A navigation tree over an assembly.
///
/// Owns the [`VisibilityTree`], its [`VirtualTreeView`], and the scene
/// collaborator. The row host is borrowed per call, wrapped in
/// [`ColoredRows`] so rows carry the scene's color swatches.
///
/// Every state mutation forwards changed leaves to
/// [`SceneHandler::object_changed`] while propagating, then calls
/// [`SceneHandler::scene_updated`] once and refreshes the visible rows.
#[derive(Debug)]
pub struct AssemblyTree<S> {
    model: VisibilityTree,
    view: VirtualTreeView,
    scene: S,
}

impl<S: SceneHandler> AssemblyTree<S> {
    /// Builds the model, creates the view, and runs the initial staged
    /// expansion to [`AssemblyTreeOptions::initial_level`].
    pub fn new<H>(
        data: &NestedVisibilityData,
        options: AssemblyTreeOptions,
        scene: S,
        host: &mut H,
    ) -> Self
    where
        H: RowHost + ?Sized,
    {
        let mut model = VisibilityTree::build(data, options.tree);
        let mut rows = ColoredRows::new(host, &scene);
        let mut view = VirtualTreeView::create(&model, &mut rows, options.view);
        view.open_level(&mut model, &mut rows, options.initial_level);
        Self { model, view, scene }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &VisibilityTree {
        &self.model
    }

    /// The view state.
    #[must_use]
    pub fn view(&self) -> &VirtualTreeView {
        &self.view
    }

    /// The scene collaborator.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene collaborator.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Dispatches a raw UI event. Returns `true` if it changed anything.
    pub fn handle_event<H>(&mut self, host: &mut H, event: TreeEvent<'_>) -> bool
    where
        H: RowHost + ?Sized,
    {
        match event {
            TreeEvent::IconClick { path, icon } => self.toggle_icon(host, path, icon),
            TreeEvent::LabelClick { path, modifiers } => {
                self.select_label(host, path, modifiers).is_some()
            }
            TreeEvent::CaretClick { path } => self.toggle_expanded(host, path),
            TreeEvent::Scroll { offset } => {
                let mut rows = ColoredRows::new(host, &self.scene);
                self.view.on_scroll(offset, &mut rows)
            }
            TreeEvent::AnimationFrame => {
                let mut rows = ColoredRows::new(host, &self.scene);
                self.view.on_animation_frame(&self.model, &mut rows).is_some()
            }
        }
    }

    /// Toggles one icon of the node at `path`, as a click would.
    pub fn toggle_icon<H>(&mut self, host: &mut H, path: &str, icon: Icon) -> bool
    where
        H: RowHost + ?Sized,
    {
        let Some(id) = self.model.find_node_by_path(path) else {
            return false;
        };
        self.mutate(host, true, |model, scene| {
            model.toggle_node_state(id, icon, None, scene)
        })
    }

    /// Applies a named action (`"show"`, `"hide"`, `"toggle"`) to one icon.
    ///
    /// See [`VisibilityTree::apply_action`].
    pub fn apply_action<H>(
        &mut self,
        host: &mut H,
        path: &str,
        icon: usize,
        action: &str,
    ) -> Result<bool, TreeError>
    where
        H: RowHost + ?Sized,
    {
        let mut result = Ok(false);
        self.mutate(host, true, |model, scene| {
            result = model.apply_action(path, icon, action, scene);
            matches!(result, Ok(true))
        });
        result
    }

    /// Hides every part.
    pub fn hide_all<H>(&mut self, host: &mut H) -> bool
    where
        H: RowHost + ?Sized,
    {
        self.mutate(host, true, |model, scene| model.hide_all(scene))
    }

    /// Shows every part.
    pub fn show_all<H>(&mut self, host: &mut H) -> bool
    where
        H: RowHost + ?Sized,
    {
        self.mutate(host, true, |model, scene| model.show_all(scene))
    }

    /// Shows the node at `path`.
    pub fn show<H>(&mut self, host: &mut H, path: &str) -> bool
    where
        H: RowHost + ?Sized,
    {
        self.mutate(host, true, |model, scene| model.show(path, scene))
    }

    /// Hides the node at `path`.
    pub fn hide<H>(&mut self, host: &mut H, path: &str) -> bool
    where
        H: RowHost + ?Sized,
    {
        self.mutate(host, true, |model, scene| model.hide(path, scene))
    }

    /// Leaf states keyed by path, for persistence.
    #[must_use]
    pub fn states(&self) -> BTreeMap<String, [IconState; 2]> {
        self.model.states()
    }

    /// Restores leaf states. Scene changes are reported with `notify = false`.
    pub fn set_states<H, I, K>(&mut self, host: &mut H, states: I) -> bool
    where
        H: RowHost + ?Sized,
        I: IntoIterator<Item = (K, [IconState; 2])>,
        K: AsRef<str>,
    {
        self.mutate(host, false, |model, scene| model.set_states(states, scene))
    }

    /// Reports a label click to the scene and moves the label highlight.
    ///
    /// Returns whether the label is highlighted afterwards, or `None` if the
    /// path does not resolve or the view was disposed.
    pub fn select_label<H>(&mut self, host: &mut H, path: &str, modifiers: Modifiers) -> Option<bool>
    where
        H: RowHost + ?Sized,
    {
        if !self.view.is_alive() {
            return None;
        }
        let id = self.model.find_node_by_path(path)?;
        let node = self.model.node(id);
        let parent_path = node.path().rsplit_once('/').map_or("", |(parent, _)| parent);
        self.scene.pick(Pick {
            parent_path,
            name: node.name(),
            modifiers,
            kind: node.kind(),
            from_tree: true,
        });
        let mut rows = ColoredRows::new(host, &self.scene);
        Some(self.view.select_label(&self.model, &mut rows, id))
    }

    /// Flips the expansion of the branch at `path`.
    pub fn toggle_expanded<H>(&mut self, host: &mut H, path: &str) -> bool
    where
        H: RowHost + ?Sized,
    {
        let Some(id) = self.model.find_node_by_path(path) else {
            return false;
        };
        let mut rows = ColoredRows::new(host, &self.scene);
        self.view
            .toggle_expanded(&mut self.model, &mut rows, id)
            .is_some()
    }

    /// Expands to `level` in stages. See [`VirtualTreeView::open_level`].
    pub fn open_level<H>(&mut self, host: &mut H, level: i32) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let mut rows = ColoredRows::new(host, &self.scene);
        self.view.open_level(&mut self.model, &mut rows, level)
    }

    /// Collapses every branch.
    pub fn collapse_all<H>(&mut self, host: &mut H) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        self.open_level(host, 0)
    }

    /// Expands every branch.
    pub fn expand_all<H>(&mut self, host: &mut H) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let mut rows = ColoredRows::new(host, &self.scene);
        self.view.expand_all(&mut self.model, &mut rows)
    }

    /// Reveals, scrolls to, and highlights the node at `path`.
    pub fn open_path<H>(&mut self, host: &mut H, path: &str) -> bool
    where
        H: RowHost + ?Sized,
    {
        let mut rows = ColoredRows::new(host, &self.scene);
        self.view.open_path(&mut self.model, &mut rows, path).is_some()
    }

    /// Re-syncs the visible rows with the model.
    pub fn refresh<H>(&mut self, host: &mut H) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let mut rows = ColoredRows::new(host, &self.scene);
        self.view.update(&self.model, &mut rows, None)
    }

    /// Tears the view down; pending frames become no-ops.
    pub fn dispose(&mut self) {
        self.view.dispose();
    }

    fn mutate<H, F>(&mut self, host: &mut H, notify: bool, apply: F) -> bool
    where
        H: RowHost + ?Sized,
        F: FnOnce(&mut VisibilityTree, &mut SceneForwarder<'_, S>) -> bool,
    {
        let mut forwarder = SceneForwarder {
            scene: &mut self.scene,
            notify,
            leaves: 0,
        };
        let changed = apply(&mut self.model, &mut forwarder);
        let leaves = forwarder.leaves;
        tracing::debug!(changed, leaves, notify, "applied state change");
        if changed {
            self.scene.scene_updated();
            self.refresh(host);
        }
        changed
    }
}
