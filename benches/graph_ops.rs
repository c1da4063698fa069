//! Benchmarks for graph construction.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point3, Vector3};
use vasgraph::algo::decimate::{decimate, DecimateOptions};
use vasgraph::algo::shortest_path::Adjacency;
use vasgraph::prelude::*;

/// Binary vessel tree in depth-first point order. Each bifurcation is a run
/// of three labeled points; the second child starts with one more point of
/// the same label.
struct TreeBuilder {
    points: Vec<Point3<f64>>,
    edges: EdgeList,
    ids: Vec<i64>,
    next_label: i64,
    segment_len: usize,
}

impl TreeBuilder {
    fn push(&mut self, parent: Option<usize>, p: Point3<f64>, label: i64) -> usize {
        let i = self.points.len();
        self.points.push(p);
        self.ids.push(label);
        if let Some(parent) = parent {
            self.edges.push(parent, i);
        }
        i
    }

    fn branch(&mut self, parent: Option<usize>, start: Point3<f64>, dir: Vector3<f64>, depth: usize) {
        let mut last = parent;
        let mut p = start;
        for _ in 0..self.segment_len {
            last = Some(self.push(last, p, -1));
            p += dir;
        }
        if depth == 0 {
            return;
        }

        let label = self.next_label;
        self.next_label += 1;
        let mut junction_end = last;
        for _ in 0..3 {
            junction_end = Some(self.push(junction_end, p, label));
            p += dir * 0.5;
        }

        let spread = Vector3::new(0.0, 1.0 / (depth as f64 + 1.0), 0.0);
        self.branch(junction_end, p, (dir + spread).normalize(), depth - 1);

        let q = p - dir * 0.25 - spread;
        let start = self.push(junction_end, q, label);
        self.branch(Some(start), q + dir, (dir - spread).normalize(), depth - 1);
    }
}

fn create_tree(depth: usize, segment_len: usize) -> Centerline {
    let mut builder = TreeBuilder {
        points: Vec::new(),
        edges: EdgeList::new(),
        ids: Vec::new(),
        next_label: 0,
        segment_len,
    };
    builder.branch(None, Point3::origin(), Vector3::x(), depth);
    let n = builder.points.len();
    Centerline::new(builder.points, builder.edges, builder.ids, vec![1.0; n]).unwrap()
}

fn bench_decimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate");
    for segment_len in [20, 60] {
        let centerline = create_tree(4, segment_len);
        let boundary = centerline.boundary();
        let options = DecimateOptions::new(0.1).with_remove_caps(1);
        group.bench_with_input(
            BenchmarkId::from_parameter(centerline.num_points()),
            &centerline,
            |b, centerline| {
                b.iter(|| {
                    decimate(
                        centerline.points().to_vec(),
                        centerline.edges(),
                        &boundary,
                        &options,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let centerline = create_tree(5, 40);
    let adjacency = Adjacency::new(centerline.points(), centerline.edges());

    c.bench_function("dijkstra_from_inlet", |b| {
        b.iter(|| adjacency.dijkstra(0).unwrap())
    });
}

fn bench_build_graph(c: &mut Criterion) {
    let centerline = create_tree(4, 60);

    c.bench_function("build_graph_parallel", |b| {
        let options = GraphOptions::new(0.2);
        b.iter(|| build_graph(&centerline, &options).unwrap())
    });

    c.bench_function("build_graph_sequential", |b| {
        let options = GraphOptions::new(0.2).with_parallel(false);
        b.iter(|| build_graph(&centerline, &options).unwrap())
    });
}

criterion_group!(benches, bench_decimation, bench_dijkstra, bench_build_graph);
criterion_main!(benches);
