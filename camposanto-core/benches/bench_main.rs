use camposanto_core::prelude::*;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::{LineString, Point};

/// Square grid of crossing roads, spaced roughly 55 m apart
fn grid_roads(size: usize) -> Vec<Road> {
    let step = 0.0005;
    let (lon0, lat0) = (123.33, 10.95);

    let mut roads = Vec::new();
    for row in 0..size {
        let lat = lat0 + row as f64 * step;
        let path: LineString<f64> = (0..size)
            .map(|col| (lon0 + col as f64 * step, lat))
            .collect::<Vec<_>>()
            .into();
        roads.push(Road::new(None, path));
    }
    for col in 0..size {
        let lon = lon0 + col as f64 * step;
        let path: LineString<f64> = (0..size)
            .map(|row| (lon, lat0 + row as f64 * step))
            .collect::<Vec<_>>()
            .into();
        roads.push(Road::new(None, path));
    }
    roads
}

fn bench_build(c: &mut Criterion) {
    let roads = grid_roads(10);
    c.bench_function("build_road_graph/grid_10x10", |b| {
        b.iter(|| build_road_graph(black_box(&roads), &GraphConfig::default()).unwrap());
    });
}

fn bench_route(c: &mut Criterion) {
    let roads = grid_roads(10);
    let graph = build_road_graph(&roads, &GraphConfig::default()).unwrap();
    let (source, _) = graph.nearest_node(Point::new(123.33, 10.95)).unwrap();
    let (target, _) = graph
        .nearest_node(Point::new(123.33 + 9.0 * 0.0005, 10.95 + 9.0 * 0.0005))
        .unwrap();

    c.bench_function("shortest_path/grid_10x10_corner_to_corner", |b| {
        b.iter(|| shortest_path(black_box(&graph), source, target).unwrap());
    });
}

criterion_group!(benches, bench_build, bench_route);
criterion_main!(benches);
