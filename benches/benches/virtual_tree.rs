// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_virtual_tree::{RowHost, RowInfo, ViewConfig, VirtualTreeView};
use understory_visibility_tree::{
    Icon, IconState, IgnoreChanges, NestedVisibilityData, TreeOptions, VisibilityTree,
};

/// Accepts every command and does nothing.
struct NullHost;

impl RowHost for NullHost {
    fn create_placeholder(&mut self, row: RowInfo<'_>) {
        black_box(row);
    }

    fn materialize(&mut self, row: RowInfo<'_>) {
        black_box(row);
    }

    fn set_icon(&mut self, path: &str, icon: Icon, state: IconState) {
        black_box((path, icon, state));
    }

    fn set_children_visible(&mut self, _path: &str, _visible: bool) {}
}

fn flat(leaves: usize) -> VisibilityTree {
    let leaf = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
    let data = NestedVisibilityData::branch((0..leaves).map(|i| (format!("part{i}"), leaf.clone())));
    VisibilityTree::build(&data, TreeOptions::default())
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_tree/create");

    // Smart expand mounts every top-level placeholder but materializes only
    // the first window.
    for leaves in [1_000usize, 10_000, 100_000] {
        let model = flat(leaves);
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &model, |b, model| {
            b.iter_batched(
                || model.clone(),
                |mut model| {
                    let mut view = VirtualTreeView::create(&model, &mut NullHost, ViewConfig::default());
                    view.open_level(&mut model, &mut NullHost, -1);
                    black_box(view);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_scroll_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_tree/scroll");

    for leaves in [10_000usize, 100_000] {
        let mut model = flat(leaves);
        let mut view = VirtualTreeView::create(&model, &mut NullHost, ViewConfig::default());
        view.open_level(&mut model, &mut NullHost, -1);
        let bottom = view.content_extent();

        // Jumping to the far end walks past every skipped row once.
        group.bench_with_input(BenchmarkId::new("jump_to_end", leaves), &view, |b, view| {
            b.iter_batched(
                || view.clone(),
                |mut view| {
                    view.on_scroll(bottom, &mut NullHost);
                    black_box(view.on_animation_frame(&model, &mut NullHost));
                },
                BatchSize::LargeInput,
            );
        });

        // Re-syncing an already materialized window after a state change.
        let mut hidden = model.clone();
        hidden.hide_all(&mut IgnoreChanges);
        group.bench_with_input(BenchmarkId::new("icon_sync", leaves), &view, |b, view| {
            b.iter_batched(
                || view.clone(),
                |mut view| black_box(view.update(&hidden, &mut NullHost, None)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create, bench_scroll_update);
criterion_main!(benches);
