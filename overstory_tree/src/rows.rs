// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_virtual_tree::{RowHost, RowInfo};
use understory_visibility_tree::{Icon, IconState};

use crate::SceneHandler;

/// A [`RowHost`] adapter that fills [`RowInfo::color`] from
/// [`SceneHandler::node_color`] before forwarding each row.
#[derive(Debug)]
pub struct ColoredRows<'a, H: ?Sized, S: ?Sized> {
    host: &'a mut H,
    scene: &'a S,
}

impl<'a, H, S> ColoredRows<'a, H, S>
where
    H: RowHost + ?Sized,
    S: SceneHandler + ?Sized,
{
    /// Wraps `host`, pulling colors from `scene`.
    pub fn new(host: &'a mut H, scene: &'a S) -> Self {
        Self { host, scene }
    }
}

impl<H, S> RowHost for ColoredRows<'_, H, S>
where
    H: RowHost + ?Sized,
    S: SceneHandler + ?Sized,
{
    fn create_placeholder(&mut self, mut row: RowInfo<'_>) {
        row.color = self.scene.node_color(row.path);
        self.host.create_placeholder(row);
    }

    fn materialize(&mut self, mut row: RowInfo<'_>) {
        row.color = self.scene.node_color(row.path);
        self.host.materialize(row);
    }

    fn set_icon(&mut self, path: &str, icon: Icon, state: IconState) {
        self.host.set_icon(path, icon, state);
    }

    fn set_children_visible(&mut self, path: &str, visible: bool) {
        self.host.set_children_visible(path, visible);
    }

    fn scroll_into_view(&mut self, path: &str, offset: f64) {
        self.host.scroll_into_view(path, offset);
    }

    fn highlight_label(&mut self, path: &str, highlighted: bool) {
        self.host.highlight_label(path, highlighted);
    }

    fn request_frame(&mut self) {
        self.host.request_frame();
    }
}
