// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_visibility_tree::{
    Icon, IconState, IgnoreChanges, NestedVisibilityData, TreeOptions, VisibilityTree,
};

/// `groups` sub-assemblies of `parts` leaves each.
fn assembly(groups: usize, parts: usize) -> NestedVisibilityData {
    let leaf = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
    NestedVisibilityData::branch((0..groups).map(|g| {
        let children = (0..parts).map(|p| (format!("p{p}"), leaf.clone()));
        (format!("g{g}"), NestedVisibilityData::branch(children))
    }))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_tree/build");

    for leaves in [1_000usize, 10_000, 100_000] {
        let data = assembly(leaves / 100, 100);
        group.throughput(Throughput::Elements(leaves as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &data, |b, data| {
            b.iter(|| black_box(VisibilityTree::build(data, TreeOptions::default())));
        });
    }

    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_tree/toggle");

    // Toggling the root touches every node; toggling one leaf walks only
    // its ancestors.
    for leaves in [1_000usize, 10_000, 100_000] {
        let tree = VisibilityTree::build(&assembly(leaves / 100, 100), TreeOptions::default());
        let root = tree.root();
        let leaf = tree.find_node_by_path("g0/p0").expect("leaf exists");
        group.throughput(Throughput::Elements(leaves as u64));

        group.bench_with_input(BenchmarkId::new("root", leaves), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    tree.toggle_node_state(root, Icon::Shape, None, &mut IgnoreChanges);
                    black_box(tree);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("leaf", leaves), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    tree.toggle_node_state(leaf, Icon::Shape, None, &mut IgnoreChanges);
                    black_box(tree);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_states_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_tree/states");
    let mut tree = VisibilityTree::build(&assembly(100, 100), TreeOptions::default());
    tree.hide("g7", &mut IgnoreChanges);
    let saved = tree.states();
    group.throughput(Throughput::Elements(saved.len() as u64));

    group.bench_function("snapshot", |b| b.iter(|| black_box(tree.states())));
    group.bench_function("restore", |b| {
        b.iter_batched(
            || VisibilityTree::build(&assembly(100, 100), TreeOptions::default()),
            |mut fresh| {
                fresh.set_states(saved.iter().map(|(k, v)| (k, *v)), &mut IgnoreChanges);
                black_box(fresh);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_toggle, bench_states_round_trip);
criterion_main!(benches);
