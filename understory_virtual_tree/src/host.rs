// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The representation layer a view drives.

use alloc::string::String;

use understory_visibility_tree::{Icon, IconState, NodeId, NodeKind, TreeNode};

/// Everything a host needs to draw one row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowInfo<'a> {
    /// The model node this row represents.
    pub node: NodeId,
    /// Full path of the node.
    pub path: &'a str,
    /// Local name, used as the label.
    pub name: &'a str,
    /// Depth from the root, used for indentation.
    pub level: usize,
    /// Leaf or branch.
    pub kind: NodeKind,
    /// Expansion flag for branches.
    pub expanded: Option<bool>,
    /// `[shape, edges]` states at the time the row was produced.
    pub state: [IconState; 2],
    /// Optional color swatch for the label.
    pub color: Option<String>,
}

impl<'a> RowInfo<'a> {
    /// Describes `node` without a color swatch.
    #[must_use]
    pub fn new(id: NodeId, node: &'a TreeNode) -> Self {
        Self {
            node: id,
            path: node.path(),
            name: node.name(),
            level: node.level(),
            kind: node.kind(),
            expanded: node.expanded(),
            state: node.state(),
            color: None,
        }
    }
}

/// Receives row lifecycle and update commands from a
/// [`VirtualTreeView`](crate::VirtualTreeView).
///
/// Rows are addressed by path. A row is created once as a placeholder and
/// materialized at most once; there is no teardown short of dropping the
/// whole host.
pub trait RowHost {
    /// A row became reachable. Only the path and last known state matter.
    fn create_placeholder(&mut self, row: RowInfo<'_>);

    /// Replace the placeholder for `row.path` with a full interactive row
    /// (icons, label, caret, and an empty children container).
    fn materialize(&mut self, row: RowInfo<'_>);

    /// Update one icon of a materialized row.
    fn set_icon(&mut self, path: &str, icon: Icon, state: IconState);

    /// Show or hide the children container of a materialized branch row.
    fn set_children_visible(&mut self, path: &str, visible: bool);

    /// Scroll so the row at `path` (whose top is at `offset`) is visible.
    fn scroll_into_view(&mut self, path: &str, offset: f64) {
        let _ = (path, offset);
    }

    /// Turn the label highlight of a row on or off.
    fn highlight_label(&mut self, path: &str, highlighted: bool) {
        let _ = (path, highlighted);
    }

    /// Ask for [`VirtualTreeView::on_animation_frame`](crate::VirtualTreeView::on_animation_frame)
    /// to be called on the next frame.
    fn request_frame(&mut self) {}
}

impl<H: RowHost + ?Sized> RowHost for &mut H {
    fn create_placeholder(&mut self, row: RowInfo<'_>) {
        (**self).create_placeholder(row);
    }

    fn materialize(&mut self, row: RowInfo<'_>) {
        (**self).materialize(row);
    }

    fn set_icon(&mut self, path: &str, icon: Icon, state: IconState) {
        (**self).set_icon(path, icon, state);
    }

    fn set_children_visible(&mut self, path: &str, visible: bool) {
        (**self).set_children_visible(path, visible);
    }

    fn scroll_into_view(&mut self, path: &str, offset: f64) {
        (**self).scroll_into_view(path, offset);
    }

    fn highlight_label(&mut self, path: &str, highlighted: bool) {
        (**self).highlight_label(path, highlighted);
    }

    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}
