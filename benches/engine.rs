// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use proteus::engine::{CanvasEngine, HydratePartial, NodeChange, Snapshot};
use proteus::model::{Edge, EdgeId, Node, NodeId, NodeKind, Position};

fn seeded_engine(node_count: usize) -> CanvasEngine {
    let nodes: Vec<Node> = (1..=node_count)
        .map(|n| {
            Node::new(
                NodeId::new(n.to_string()).expect("node id"),
                NodeKind::Factor,
                Position::new(n as f64 * 10.0, (n % 7) as f64 * 24.0),
                format!("Node {n}"),
            )
        })
        .collect();
    let edges: Vec<Edge> = (1..node_count)
        .map(|n| {
            Edge::new(
                EdgeId::new(format!("e{n}")).expect("edge id"),
                NodeId::new(n.to_string()).expect("source id"),
                NodeId::new((n + 1).to_string()).expect("target id"),
            )
        })
        .collect();

    let mut engine = CanvasEngine::new();
    engine.hydrate(HydratePartial {
        nodes: Some(nodes),
        edges: Some(edges),
        scenario_id: None,
    });
    engine
}

// Benchmark identity (keep stable):
// - Group name in this file: `engine.edit_cycle`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `push_undo_redo_small`,
//   `signature_medium`).
// - If implementations move/deduplicate, update the wiring but do not
//   rename group or case IDs.
fn benches_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine.edit_cycle");

    group.bench_function("push_undo_redo_small", |b| {
        b.iter_batched(
            || seeded_engine(20),
            |mut engine| {
                engine.add_node(None, None);
                engine.undo();
                engine.redo();
                black_box(engine.history().past_len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("signature_medium", |b| {
        let engine = seeded_engine(200);
        b.iter(|| Snapshot::capture(black_box(engine.canvas())).signature());
    });

    group.bench_function("drag_burst_medium", |b| {
        b.iter_batched(
            || seeded_engine(200),
            |mut engine| {
                let t0 = Instant::now();
                let node_id = NodeId::new("1").expect("node id");
                for step in 0..10u64 {
                    engine.apply_node_changes_at(
                        &[NodeChange::Position {
                            node_id: node_id.clone(),
                            position: Position::new(step as f64, step as f64),
                            dragging: true,
                        }],
                        t0 + Duration::from_millis(step),
                    );
                }
                engine.tick_at(t0 + Duration::from_secs(1));
                black_box(engine.history().past_len())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benches_engine);
criterion_main!(benches);
