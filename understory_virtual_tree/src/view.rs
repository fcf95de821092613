// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtualized tree view controller.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{AddAssign, Range};

use understory_visibility_tree::{Icon, IconState, NodeId, VisibilityTree};

use crate::{RowHost, RowInfo, ViewConfig};

/// Work done by one update pass, returned instead of kept in counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Rows whose subtree overlapped the window and were inspected.
    pub visited: usize,
    /// Placeholders replaced by full rows.
    pub materialized: usize,
    /// Placeholders created for newly reachable children.
    pub placeholders: usize,
    /// Icon updates pushed to already materialized rows.
    pub icons_synced: usize,
}

impl AddAssign for UpdateStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.materialized += rhs.materialized;
        self.placeholders += rhs.placeholders;
        self.icons_synced += rhs.icons_synced;
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct RowState {
    mounted: bool,
    rendered: bool,
    children_mounted: bool,
    children_shown: bool,
    /// Icon states last pushed to the host.
    icons: [IconState; 2],
    /// Rows occupied by this node and its shown descendants.
    rows: usize,
}

/// Keeps a window of rows materialized over a [`VisibilityTree`].
///
/// The view owns only presentation state (which rows exist, which are
/// materialized, and the scroll position). The model is passed into each call,
/// so the same tree can be mutated between calls; the view picks up changed
/// icon states and expansion flags on its next update.
///
/// Layout is one fixed-height row per mounted node, in depth-first order.
/// Collapsed containers contribute no height.
#[derive(Clone, Debug)]
pub struct VirtualTreeView {
    config: ViewConfig,
    scroll_offset: f64,
    rows: Vec<RowState>,
    mounted: usize,
    rendered: usize,
    highlighted: Option<NodeId>,
    seen_expansion: u64,
    ticking: bool,
    alive: bool,
}

impl VirtualTreeView {
    /// Creates a view for `model` and mounts the root placeholder.
    ///
    /// Call [`VirtualTreeView::update`] afterwards to materialize the first
    /// window of rows.
    pub fn create<H>(model: &VisibilityTree, host: &mut H, config: ViewConfig) -> Self
    where
        H: RowHost + ?Sized,
    {
        let mut view = Self {
            config,
            scroll_offset: 0.0,
            rows: vec![RowState::default(); model.node_count()],
            mounted: 0,
            rendered: 0,
            highlighted: None,
            seen_expansion: model.expansion_revision(),
            ticking: false,
            alive: true,
        };
        view.mount(model, host, model.root());
        view
    }

    /// Returns the layout configuration.
    #[must_use]
    pub fn config(&self) -> ViewConfig {
        self.config
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset, clamped to `[0, content_extent - viewport_height]`.
    ///
    /// Does not update rows; see [`VirtualTreeView::on_scroll`] for the
    /// coalesced path.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = self.clamp_scroll(offset);
    }

    /// Sets the viewport height and re-clamps the scroll offset.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.config.viewport_height = height.max(0.0);
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    /// Total height of all rows currently in the layout.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.rows
            .first()
            .map_or(0.0, |root| root.rows as f64 * self.config.row_height)
    }

    /// Returns `true` if a placeholder or full row exists for `id`.
    #[must_use]
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.rows.get(id.index()).is_some_and(|row| row.mounted)
    }

    /// Returns `true` if `id` has been materialized.
    #[must_use]
    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.rows.get(id.index()).is_some_and(|row| row.rendered)
    }

    /// Number of mounted rows (placeholders and full rows).
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.mounted
    }

    /// Number of materialized rows.
    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.rendered
    }

    /// The currently highlighted label, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighted
    }

    /// Returns `false` once [`VirtualTreeView::dispose`] has run.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns `true` while a frame has been requested but not yet run.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// The vertical band, in content coordinates, within which rows are
    /// materialized.
    #[must_use]
    pub fn window(&self) -> Range<f64> {
        let top = self.scroll_offset - self.config.margin;
        let bottom = self.scroll_offset + self.config.viewport_height + self.config.margin;
        top..bottom
    }

    /// Top offset of the row for `id`.
    ///
    /// Returns `None` if the row is not mounted or sits inside a hidden
    /// container.
    #[must_use]
    pub fn row_offset(&self, model: &VisibilityTree, id: NodeId) -> Option<f64> {
        if !self.is_mounted(id) {
            return None;
        }
        let mut rows_above = 0;
        let mut current = id;
        while let Some(parent) = model.parent(current) {
            if !self.rows.get(parent.index())?.children_shown {
                return None;
            }
            rows_above += 1;
            for sibling in model.children(parent) {
                if *sibling == current {
                    break;
                }
                rows_above += self.rows[sibling.index()].rows;
            }
            current = parent;
        }
        Some(rows_above as f64 * self.config.row_height)
    }

    /// Mounted rows overlapping the window, with their top offsets, in
    /// display order.
    #[must_use]
    pub fn visible_rows(&self, model: &VisibilityTree) -> Vec<(NodeId, f64)> {
        let mut visible = Vec::new();
        if !self.alive {
            return visible;
        }
        let row_height = self.config.row_height;
        let window = self.window();
        let mut y = 0.0;
        let mut frames = Vec::new();
        let mut next = Some(model.root());
        while let Some(id) = next.take().or_else(|| next_child(model, &mut frames)) {
            let row = self.rows[id.index()];
            let extent = row.rows as f64 * row_height;
            if y + extent <= window.start {
                y += extent;
                continue;
            }
            if y >= window.end {
                break;
            }
            if y + row_height > window.start {
                visible.push((id, y));
            }
            y += row_height;
            if row.children_shown {
                frames.push((id, 0));
            }
        }
        visible
    }

    /// Brings the materialized window in line with the model.
    ///
    /// With a `prefix`, only the subtree rooted at that path is walked. For
    /// every row overlapping the window this materializes the placeholder if
    /// needed, pushes icon states that differ from what the host last saw,
    /// mounts child placeholders the first time an expanded branch is
    /// reached, and shows or hides children containers to match the model.
    pub fn update<H>(
        &mut self,
        model: &VisibilityTree,
        host: &mut H,
        prefix: Option<&str>,
    ) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        self.update_pass(model, host, prefix, None)
    }

    /// Records a scroll position and schedules at most one update per frame.
    ///
    /// The offset is always recorded. A frame is requested only if none is
    /// pending; the pending frame reads the latest offset when it runs.
    /// Returns `true` if a frame was requested.
    pub fn on_scroll<H>(&mut self, offset: f64, host: &mut H) -> bool
    where
        H: RowHost + ?Sized,
    {
        if !self.alive {
            return false;
        }
        self.scroll_offset = self.clamp_scroll(offset);
        if self.ticking {
            return false;
        }
        self.ticking = true;
        host.request_frame();
        true
    }

    /// Runs the update scheduled by [`VirtualTreeView::on_scroll`].
    ///
    /// Returns `None` without touching anything if the view was disposed
    /// while the frame was pending.
    pub fn on_animation_frame<H>(&mut self, model: &VisibilityTree, host: &mut H) -> Option<UpdateStats>
    where
        H: RowHost + ?Sized,
    {
        if !self.alive {
            tracing::trace!("animation frame after dispose ignored");
            return None;
        }
        self.ticking = false;
        Some(self.update(model, host, None))
    }

    /// Expands branches to `level` (see
    /// [`VisibilityTree::set_expanded_level`]) and materializes the result in
    /// stages, one depth-limited pass per level.
    ///
    /// Level `-1` stages up to the model's maximum level.
    pub fn open_level<H>(&mut self, model: &mut VisibilityTree, host: &mut H, level: i32) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let mut stats = UpdateStats::default();
        if !self.alive {
            return stats;
        }
        model.set_expanded_level(level);
        let last = match usize::try_from(level) {
            Ok(level) => level,
            Err(_) if level == -1 => model.max_level(),
            Err(_) => 0,
        };
        for stage in 0..=last {
            let pass = self.update_pass(model, host, None, Some(stage));
            tracing::debug!(stage, placeholders = pass.placeholders, "open level stage");
            stats += pass;
        }
        stats
    }

    /// Collapses every branch.
    pub fn collapse_all<H>(&mut self, model: &mut VisibilityTree, host: &mut H) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        self.open_level(model, host, 0)
    }

    /// Expands every branch.
    pub fn expand_all<H>(&mut self, model: &mut VisibilityTree, host: &mut H) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let level = i32::try_from(model.max_level()).unwrap_or(i32::MAX);
        self.open_level(model, host, level)
    }

    /// Flips the expansion of a branch and updates the window.
    ///
    /// Returns `None` for leaves.
    pub fn toggle_expanded<H>(
        &mut self,
        model: &mut VisibilityTree,
        host: &mut H,
        id: NodeId,
    ) -> Option<UpdateStats>
    where
        H: RowHost + ?Sized,
    {
        if !self.alive {
            return None;
        }
        model.toggle_expanded(id)?;
        Some(self.update(model, host, None))
    }

    /// Expands every segment of `path` (the target too, when it is a branch),
    /// scrolls its row to the top of the viewport, and highlights its label.
    ///
    /// Segments are opened one at a time with an update after each, so each
    /// container exists before the walk descends into it. Returns `None` if
    /// the path does not resolve.
    pub fn open_path<H>(
        &mut self,
        model: &mut VisibilityTree,
        host: &mut H,
        path: &str,
    ) -> Option<UpdateStats>
    where
        H: RowHost + ?Sized,
    {
        if !self.alive {
            return None;
        }
        let target = model.find_node_by_path(path)?;
        // Target first when it is a branch, then its ancestors; walked in reverse.
        let mut segments = Vec::new();
        let mut cursor = if model.is_leaf(target) {
            model.parent(target)
        } else {
            Some(target)
        };
        while let Some(id) = cursor {
            segments.push(id);
            cursor = model.parent(id);
        }

        let mut stats = UpdateStats::default();
        for segment in segments.into_iter().rev() {
            model.set_expanded(segment, true);
            self.reconcile_expansion(model, host);
            self.reveal(model, host, segment, &mut stats);
            stats += self.update_pass(model, host, Some(model.node(segment).path()), None);
        }
        self.reveal(model, host, target, &mut stats);

        let offset = self.row_offset(model, target)?;
        self.set_scroll_offset(offset);
        let target_path = model.node(target).path();
        host.scroll_into_view(target_path, offset);
        stats += self.update(model, host, None);

        if self.highlighted != Some(target) {
            self.select_label(model, host, target);
        }
        tracing::debug!(path = target_path, offset, "opened path");
        Some(stats)
    }

    /// Moves the label highlight to `id`.
    ///
    /// Selecting the highlighted label again clears the highlight. Returns
    /// whether `id` is highlighted afterwards; always `false` once disposed.
    pub fn select_label<H>(&mut self, model: &VisibilityTree, host: &mut H, id: NodeId) -> bool
    where
        H: RowHost + ?Sized,
    {
        if !self.alive {
            return false;
        }
        if let Some(previous) = self.highlighted.take() {
            host.highlight_label(model.node(previous).path(), false);
            if previous == id {
                return false;
            }
        }
        host.highlight_label(model.node(id).path(), true);
        self.highlighted = Some(id);
        true
    }

    /// Tears the view down. Pending frames become no-ops.
    pub fn dispose(&mut self) {
        self.alive = false;
        self.ticking = false;
        self.highlighted = None;
        self.rows = Vec::new();
        self.mounted = 0;
        self.rendered = 0;
        tracing::debug!("disposed tree view");
    }

    fn update_pass<H>(
        &mut self,
        model: &VisibilityTree,
        host: &mut H,
        prefix: Option<&str>,
        depth_limit: Option<usize>,
    ) -> UpdateStats
    where
        H: RowHost + ?Sized,
    {
        let mut stats = UpdateStats::default();
        if !self.alive {
            return stats;
        }
        self.reconcile_expansion(model, host);

        let start = match prefix {
            None => model.root(),
            Some(path) => match model.find_node_by_path(path) {
                Some(id) => id,
                None => {
                    tracing::debug!(prefix = path, "update prefix does not resolve");
                    return stats;
                }
            },
        };
        let Some(mut y) = self.row_offset(model, start) else {
            tracing::debug!(prefix, "update prefix is not in the layout");
            return stats;
        };

        let row_height = self.config.row_height;
        let window = self.window();
        let mut frames = Vec::new();
        let mut next = Some(start);
        while let Some(id) = next.take().or_else(|| next_child(model, &mut frames)) {
            let extent = self.rows[id.index()].rows as f64 * row_height;
            if y + extent <= window.start {
                y += extent;
                continue;
            }
            if y >= window.end {
                break;
            }
            stats.visited += 1;
            if y + row_height > window.start {
                self.sync_row(model, host, id, &mut stats);
            }
            self.sync_children(model, host, id, depth_limit, &mut stats);
            y += row_height;
            if self.rows[id.index()].children_shown {
                frames.push((id, 0));
            }
        }

        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
        tracing::debug!(
            visited = stats.visited,
            materialized = stats.materialized,
            placeholders = stats.placeholders,
            icons_synced = stats.icons_synced,
            "update pass"
        );
        stats
    }

    fn mount<H>(&mut self, model: &VisibilityTree, host: &mut H, id: NodeId)
    where
        H: RowHost + ?Sized,
    {
        let node = model.node(id);
        let row = &mut self.rows[id.index()];
        if row.mounted {
            return;
        }
        *row = RowState {
            mounted: true,
            icons: node.state(),
            rows: 1,
            ..RowState::default()
        };
        self.mounted += 1;
        host.create_placeholder(RowInfo::new(id, node));
    }

    fn sync_row<H>(&mut self, model: &VisibilityTree, host: &mut H, id: NodeId, stats: &mut UpdateStats)
    where
        H: RowHost + ?Sized,
    {
        let node = model.node(id);
        let row = &mut self.rows[id.index()];
        if !row.rendered {
            row.rendered = true;
            row.icons = node.state();
            self.rendered += 1;
            stats.materialized += 1;
            tracing::trace!(path = node.path(), "materialized row");
            host.materialize(RowInfo::new(id, node));
            return;
        }
        for icon in Icon::ALL {
            let state = node.icon_state(icon);
            if row.icons[icon.index()] != state {
                row.icons[icon.index()] = state;
                stats.icons_synced += 1;
                host.set_icon(node.path(), icon, state);
            }
        }
    }

    fn sync_children<H>(
        &mut self,
        model: &VisibilityTree,
        host: &mut H,
        id: NodeId,
        depth_limit: Option<usize>,
        stats: &mut UpdateStats,
    ) where
        H: RowHost + ?Sized,
    {
        let node = model.node(id);
        let Some(children) = node.children() else {
            return;
        };
        let expanded = node.expanded() == Some(true);
        let row = self.rows[id.index()];
        if expanded && !row.children_mounted {
            if !row.rendered || depth_limit.is_some_and(|limit| node.level() > limit) {
                return;
            }
            for child in children {
                self.mount(model, host, *child);
            }
            stats.placeholders += children.len();
            self.rows[id.index()].children_mounted = true;
        }
        let row = self.rows[id.index()];
        if row.children_mounted && row.children_shown != expanded {
            self.rows[id.index()].children_shown = expanded;
            host.set_children_visible(node.path(), expanded);
            let rows = self.subtree_rows(model, id);
            self.resize(model, id, rows);
        }
    }

    /// Materializes a row and realizes its children regardless of the window.
    fn reveal<H>(&mut self, model: &VisibilityTree, host: &mut H, id: NodeId, stats: &mut UpdateStats)
    where
        H: RowHost + ?Sized,
    {
        if !self.is_mounted(id) {
            return;
        }
        self.sync_row(model, host, id, stats);
        self.sync_children(model, host, id, None, stats);
    }

    /// Re-derives container visibility and row counts after expansion flags
    /// changed behind the view's back.
    fn reconcile_expansion<H>(&mut self, model: &VisibilityTree, host: &mut H)
    where
        H: RowHost + ?Sized,
    {
        let revision = model.expansion_revision();
        if revision == self.seen_expansion {
            return;
        }
        self.seen_expansion = revision;
        for id in model.node_ids().rev() {
            let row = self.rows[id.index()];
            if !row.children_mounted {
                continue;
            }
            let expanded = model.is_expanded(id) == Some(true);
            if row.children_shown != expanded {
                self.rows[id.index()].children_shown = expanded;
                host.set_children_visible(model.node(id).path(), expanded);
            }
            self.rows[id.index()].rows = self.subtree_rows(model, id);
        }
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    fn subtree_rows(&self, model: &VisibilityTree, id: NodeId) -> usize {
        let row = &self.rows[id.index()];
        if !row.children_shown {
            return 1;
        }
        1 + model
            .children(id)
            .iter()
            .map(|child| self.rows[child.index()].rows)
            .sum::<usize>()
    }

    /// Sets the row count of `id` and carries the difference to every
    /// ancestor that currently shows it.
    fn resize(&mut self, model: &VisibilityTree, id: NodeId, rows: usize) {
        let old = self.rows[id.index()].rows;
        if old == rows {
            return;
        }
        self.rows[id.index()].rows = rows;
        let mut cursor = model.parent(id);
        while let Some(parent) = cursor {
            let row = &mut self.rows[parent.index()];
            if !row.children_shown {
                break;
            }
            row.rows = row.rows - old + rows;
            cursor = model.parent(parent);
        }
    }

    fn clamp_scroll(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        let max = (self.content_extent() - self.config.viewport_height).max(0.0);
        offset.clamp(0.0, max)
    }
}

/// Advances a depth-first walk to the next child of the innermost open frame.
fn next_child(model: &VisibilityTree, frames: &mut Vec<(NodeId, usize)>) -> Option<NodeId> {
    loop {
        let (parent, index) = frames.last_mut()?;
        match model.children(*parent).get(*index) {
            Some(child) => {
                *index += 1;
                return Some(*child);
            }
            None => {
                frames.pop();
            }
        }
    }
}
