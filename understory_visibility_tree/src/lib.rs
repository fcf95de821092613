// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility_tree --heading-base-level=0

//! Understory Visibility Tree: tri-state visibility for large assemblies.
//!
//! This crate holds the canonical show/hide state of a hierarchical assembly
//! (as found in CAD viewers). Every node carries two independent icons,
//! [`Icon::Shape`] and [`Icon::Edges`], each in one of four
//! [`IconState`]s. Leaves own their state; every branch state is the
//! [`IconState::aggregate`] of its children.
//!
//! The core concepts are:
//!
//! - [`NestedVisibilityData`]: the raw nested input. Malformed values are
//!   coerced to disabled leaves, so building never fails.
//! - [`VisibilityTree`]: an arena of [`TreeNode`]s addressed by [`NodeId`] or
//!   by `/`-separated path, with expansion flags for presentation.
//! - [`VisibilityTree::toggle_node_state`]: the single mutation primitive. It
//!   pushes a new value down to every non-disabled descendant, then
//!   re-aggregates ancestors until one stops changing.
//! - [`StateObserver`]: receives every individual [`StateChange`] so rendering
//!   and scene layers can react without diffing the tree.
//!
//! This crate knows nothing about rows, scrolling, or scenes. Virtualized
//! presentation lives in `understory_virtual_tree`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_visibility_tree::{
//!     Icon, IconState, IgnoreChanges, NestedVisibilityData, TreeOptions, VisibilityTree,
//! };
//!
//! let data = NestedVisibilityData::branch([
//!     ("body", NestedVisibilityData::leaf(IconState::Selected, IconState::Selected)),
//!     ("lid", NestedVisibilityData::leaf(IconState::Selected, IconState::Selected)),
//! ]);
//! let mut tree = VisibilityTree::build(&data, TreeOptions::default());
//!
//! let lid = tree.find_node_by_path("lid").unwrap();
//! tree.toggle_node_state(lid, Icon::Shape, None, &mut IgnoreChanges);
//!
//! // Icons are linked by default, so the edges followed the shape.
//! assert_eq!(tree.node(lid).state(), [IconState::Unselected; 2]);
//! assert_eq!(tree.node(tree.root()).state(), [IconState::Mixed; 2]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to `thiserror` and `tracing`.
//! - `serde`: `Deserialize` for [`NestedVisibilityData`] (maps keep their input
//!   order) and serde support for [`IconState`] codes and [`TreeOptions`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod data;
mod error;
mod observer;
mod options;
mod propagate;
mod state;
mod tree;

pub use action::StateAction;
pub use data::NestedVisibilityData;
pub use error::TreeError;
pub use observer::{IgnoreChanges, StateChange, StateObserver};
pub use options::TreeOptions;
pub use state::{Icon, IconState, NodeKind};
pub use tree::{NodeId, Subtree, TreeNode, VisibilityTree};
