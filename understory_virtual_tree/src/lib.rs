// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_tree --heading-base-level=0

//! Understory Virtual Tree: windowed row presentation for visibility trees.
//!
//! This crate turns a [`VisibilityTree`](understory_visibility_tree::VisibilityTree)
//! into a scrollable list of rows while only ever building the rows a user
//! can see. It is renderer-agnostic: all drawing goes through a [`RowHost`].
//!
//! The core concepts are:
//!
//! - [`RowHost`]: the representation layer. It receives placeholders,
//!   materialization requests, icon updates, and container visibility.
//! - [`VirtualTreeView`]: the controller. It tracks which rows are mounted
//!   (have a placeholder) and which are rendered (fully materialized), lays
//!   rows out at a fixed height, and keeps the window
//!   `[scroll - margin, scroll + viewport + margin]` materialized.
//! - [`ViewConfig`]: row height, margin, and viewport height.
//! - [`UpdateStats`]: what one update pass did.
//!
//! Rows go through two phases. A placeholder is created the first time a row
//! becomes reachable (the root at creation, children the first time their
//! parent is expanded and on screen). The placeholder is materialized the
//! first time its row overlaps the window. Materialized rows are never turned
//! back into placeholders.
//!
//! Scroll events are coalesced: [`VirtualTreeView::on_scroll`] records the
//! offset and requests a frame only if none is pending, and
//! [`VirtualTreeView::on_animation_frame`] runs the single update. Frames that
//! arrive after [`VirtualTreeView::dispose`] are ignored.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_virtual_tree::{RowHost, RowInfo, ViewConfig, VirtualTreeView};
//! use understory_visibility_tree::{
//!     Icon, IconState, NestedVisibilityData, TreeOptions, VisibilityTree,
//! };
//!
//! #[derive(Default)]
//! struct Rows(Vec<String>);
//!
//! impl RowHost for Rows {
//!     fn create_placeholder(&mut self, _row: RowInfo<'_>) {}
//!     fn materialize(&mut self, row: RowInfo<'_>) {
//!         self.0.push(row.path.to_owned());
//!     }
//!     fn set_icon(&mut self, _path: &str, _icon: Icon, _state: IconState) {}
//!     fn set_children_visible(&mut self, _path: &str, _visible: bool) {}
//! }
//!
//! let leaf = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
//! let data = NestedVisibilityData::branch((0..1000).map(|i| (format!("part{i}"), leaf.clone())));
//! let mut tree = VisibilityTree::build(&data, TreeOptions::default());
//! tree.set_expanded_level(-1);
//!
//! let mut host = Rows::default();
//! let mut view = VirtualTreeView::create(&tree, &mut host, ViewConfig::default());
//! view.update(&tree, &mut host, None);
//!
//! // 600px viewport, 12px margin, 20px rows: the root plus 30 parts.
//! assert_eq!(host.0.len(), 31);
//! assert_eq!(view.mounted_count(), 1001);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod host;
mod view;

pub use config::ViewConfig;
pub use host::{RowHost, RowInfo};
pub use view::{UpdateStats, VirtualTreeView};
