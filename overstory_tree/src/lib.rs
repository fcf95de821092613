// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_tree --heading-base-level=0

//! Overstory Tree: the assembly navigation tree surface.
//!
//! This crate wires [`understory_visibility_tree`] (the state) and
//! [`understory_virtual_tree`] (the windowed rows) to a 3D scene through a
//! small set of collaborator interfaces:
//!
//! - [`SceneHandler`]: receives [`ObjectChange`]s for every leaf whose
//!   visibility changed, [`Pick`]s for label clicks, a single
//!   `scene_updated` call after each operation that changed something, and
//!   may supply per-row color swatches.
//! - [`TreeEvent`]: raw icon, label, caret, scroll, and frame events from the
//!   UI, dispatched by [`AssemblyTree::handle_event`].
//! - [`ColoredRows`]: a [`RowHost`](understory_virtual_tree::RowHost) adapter
//!   that decorates rows with [`SceneHandler::node_color`].
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_tree::{AssemblyTree, AssemblyTreeOptions, ObjectChange, Pick, SceneHandler, TreeEvent};
//! use understory_virtual_tree::{RowHost, RowInfo};
//! use understory_visibility_tree::{Icon, IconState, NestedVisibilityData, TreeOptions};
//!
//! #[derive(Default)]
//! struct Scene {
//!     hidden: Vec<String>,
//!     renders: usize,
//! }
//!
//! impl SceneHandler for Scene {
//!     fn object_changed(&mut self, change: ObjectChange<'_>) {
//!         if !change.visible {
//!             self.hidden.push(change.path.to_owned());
//!         }
//!     }
//!     fn pick(&mut self, _pick: Pick<'_>) {}
//!     fn scene_updated(&mut self) {
//!         self.renders += 1;
//!     }
//! }
//!
//! struct NoRows;
//!
//! impl RowHost for NoRows {
//!     fn create_placeholder(&mut self, _row: RowInfo<'_>) {}
//!     fn materialize(&mut self, _row: RowInfo<'_>) {}
//!     fn set_icon(&mut self, _path: &str, _icon: Icon, _state: IconState) {}
//!     fn set_children_visible(&mut self, _path: &str, _visible: bool) {}
//! }
//!
//! let shown = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
//! let data = NestedVisibilityData::branch([("body", shown.clone()), ("lid", shown)]);
//! let options = AssemblyTreeOptions::new().with_tree(TreeOptions::new().with_linked_icons(false));
//! let mut tree = AssemblyTree::new(&data, options, Scene::default(), &mut NoRows);
//!
//! tree.handle_event(&mut NoRows, TreeEvent::IconClick { path: "lid", icon: Icon::Shape });
//! assert_eq!(tree.scene().hidden, ["lid"]);
//! assert_eq!(tree.scene().renders, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod assembly;
mod event;
mod options;
mod rows;
mod scene;

pub use assembly::AssemblyTree;
pub use event::TreeEvent;
pub use options::AssemblyTreeOptions;
pub use rows::ColoredRows;
pub use scene::{Modifiers, ObjectChange, Pick, SceneHandler};
