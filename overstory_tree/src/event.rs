// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_visibility_tree::Icon;

use crate::Modifiers;

/// A raw UI event on the tree surface.
///
/// Dispatched with [`AssemblyTree::handle_event`](crate::AssemblyTree::handle_event).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TreeEvent<'a> {
    /// A shape or edge icon on the row at `path` was clicked.
    IconClick {
        /// Row path.
        path: &'a str,
        /// The clicked icon.
        icon: Icon,
    },
    /// The label of the row at `path` was clicked.
    LabelClick {
        /// Row path.
        path: &'a str,
        /// Modifiers held during the click.
        modifiers: Modifiers,
    },
    /// The expand caret of the row at `path` was clicked.
    CaretClick {
        /// Row path.
        path: &'a str,
    },
    /// The scroll container moved.
    Scroll {
        /// New scroll offset.
        offset: f64,
    },
    /// A frame requested through
    /// [`RowHost::request_frame`](understory_virtual_tree::RowHost::request_frame)
    /// is due.
    AnimationFrame,
}
