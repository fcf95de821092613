// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly tree in a terminal.
//!
//! Build an assembly tree from a nested JSON document (or a generated flat
//! assembly), print the rows the virtual view materializes, scroll, toggle a
//! part, and dump the persisted leaf states as JSON.
//!
//! Run:
//! - `cargo run -p understory_demos --example assembly_tree -- --parts 5000 --scroll 40000`
//! - `cargo run -p understory_demos --example assembly_tree -- --data model.json --toggle body1`
//!
//! Set `RUST_LOG=debug` to see the model and view logs.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use overstory_tree::{AssemblyTree, AssemblyTreeOptions, ObjectChange, Pick, SceneHandler, TreeEvent};
use tracing_subscriber::EnvFilter;
use understory_virtual_tree::{RowHost, RowInfo, ViewConfig};
use understory_visibility_tree::{Icon, IconState, NestedVisibilityData, NodeKind, TreeOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Nested visibility JSON (`{"name": [shape, edges] | {...}}`).
    #[arg(long, conflicts_with = "parts")]
    data: Option<PathBuf>,

    /// Generate a flat assembly with this many parts instead.
    #[arg(long, default_value_t = 1_000)]
    parts: usize,

    /// Row height in pixels.
    #[arg(long, default_value_t = 20.0)]
    row_height: f64,

    /// Overscan margin above and below the viewport.
    #[arg(long, default_value_t = 12.0)]
    margin: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 200.0)]
    viewport_height: f64,

    /// Keep shape and edge icons independent.
    #[arg(long)]
    unlinked: bool,

    /// Initial expansion level (`-1` is smart expand).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    initial_level: i32,

    /// Scroll to this offset before printing the visible rows.
    #[arg(long)]
    scroll: Option<f64>,

    /// Toggle the shape icon of the node at this path.
    #[arg(long)]
    toggle: Option<String>,
}

/// Prints row commands as they arrive.
#[derive(Debug, Default)]
struct TextRows {
    materialized: usize,
    frame_requested: bool,
}

impl RowHost for TextRows {
    fn create_placeholder(&mut self, _row: RowInfo<'_>) {}

    fn materialize(&mut self, row: RowInfo<'_>) {
        self.materialized += 1;
        let caret = match (row.kind, row.expanded) {
            (NodeKind::Leaf, _) => ' ',
            (NodeKind::Node, Some(true)) => 'v',
            (NodeKind::Node, _) => '>',
        };
        let name = if row.path.is_empty() { "<root>" } else { row.name };
        println!(
            "{indent}{caret} [{shape}|{edges}] {name}{color}",
            indent = "  ".repeat(row.level),
            shape = glyph(row.state[0]),
            edges = glyph(row.state[1]),
            color = row.color.map(|c| format!(" ({c})")).unwrap_or_default(),
        );
    }

    fn set_icon(&mut self, path: &str, icon: Icon, state: IconState) {
        println!("  icon {path:?} {icon:?} -> {state}");
    }

    fn set_children_visible(&mut self, _path: &str, _visible: bool) {}

    fn scroll_into_view(&mut self, path: &str, offset: f64) {
        println!("  scroll {path:?} to {offset}");
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

fn glyph(state: IconState) -> char {
    match state {
        IconState::Selected => '#',
        IconState::Unselected => '.',
        IconState::Mixed => '~',
        IconState::Disabled => ' ',
    }
}

/// A stand-in for the 3D scene: counts what it is told.
#[derive(Debug, Default)]
struct LoggingScene {
    shown: usize,
    hidden: usize,
    renders: usize,
}

impl SceneHandler for LoggingScene {
    fn object_changed(&mut self, change: ObjectChange<'_>) {
        if change.visible {
            self.shown += 1;
        } else {
            self.hidden += 1;
        }
    }

    fn pick(&mut self, pick: Pick<'_>) {
        println!("picked {}/{}", pick.parent_path, pick.name);
    }

    fn scene_updated(&mut self) {
        self.renders += 1;
    }

    fn node_color(&self, path: &str) -> Option<String> {
        path.ends_with('0').then(|| "#4080ff".to_owned())
    }
}

fn load(args: &Args) -> Result<NestedVisibilityData, Box<dyn Error>> {
    if let Some(path) = &args.data {
        let text = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }
    let part = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
    Ok(NestedVisibilityData::branch((0..args.parts).map(|i| (format!("part{i}"), part.clone()))))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let data = load(&args)?;
    let options = AssemblyTreeOptions::new()
        .with_tree(TreeOptions::new().with_linked_icons(!args.unlinked))
        .with_view(
            ViewConfig::new()
                .with_row_height(args.row_height)
                .with_margin(args.margin)
                .with_viewport_height(args.viewport_height),
        )
        .with_initial_level(args.initial_level);

    let mut rows = TextRows::default();
    let mut tree = AssemblyTree::new(&data, options, LoggingScene::default(), &mut rows);
    tracing::info!(
        nodes = tree.model().node_count(),
        leaves = tree.model().leaf_count(),
        materialized = rows.materialized,
        "tree built"
    );

    if let Some(offset) = args.scroll {
        println!("-- scroll to {offset}");
        tree.handle_event(&mut rows, TreeEvent::Scroll { offset });
        if std::mem::take(&mut rows.frame_requested) {
            tree.handle_event(&mut rows, TreeEvent::AnimationFrame);
        }
    }

    if let Some(path) = &args.toggle {
        println!("-- toggle {path}");
        if !tree.handle_event(&mut rows, TreeEvent::IconClick { path, icon: Icon::Shape }) {
            tracing::warn!(path = path.as_str(), "nothing to toggle");
        }
    }

    let scene = tree.scene();
    tracing::info!(
        shown = scene.shown,
        hidden = scene.hidden,
        renders = scene.renders,
        rendered = tree.view().rendered_count(),
        "done"
    );
    println!("{}", serde_json::to_string_pretty(&tree.states())?);
    Ok(())
}
