//! Benchmarks for signal discovery and scope writing
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scopegen::layout::ScopeLayout;
use scopegen::scope::ScopeWriter;
use scopegen::tree::DataDescription;
use scopegen::{discover, DiscoverOptions, MemoryTree, NodeId, ScopeOptions, SignalTree};

/// `arrays` structures holding `per_array` calibrated signals each
fn build_tree(arrays: usize, per_array: usize) -> MemoryTree {
    let mut tree = MemoryTree::new("bench");
    for a in 0..arrays {
        let array = tree.add_child(NodeId::TOP, &format!("array{}", a)).unwrap();
        for s in 0..per_array {
            let signal = tree.add_member(array, &format!("sig{}", s)).unwrap();
            tree.get_mut(signal).unwrap().usage = Some("SIGNAL".to_string());
            let calib = tree.add_member(signal, "calib").unwrap();
            tree.get_mut(calib).unwrap().data = Some(DataDescription {
                units: Some("T/s/V".to_string()),
            });
        }
    }
    tree
}

fn bench_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");

    for arrays in [10, 100, 1000].iter() {
        let tree = build_tree(*arrays, 16);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_with_input(BenchmarkId::new("tree", arrays), arrays, |b, _| {
            b.iter(|| black_box(discover(&tree.top(), DiscoverOptions::default())));
        });
    }

    group.finish();
}

fn bench_write_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_scope");
    let options = ScopeOptions::default();

    for arrays in [1, 10, 100].iter() {
        let tree = build_tree(*arrays, 16);
        let signals = discover(&tree.top(), DiscoverOptions::default());
        let layout = ScopeLayout::compute(signals.len(), options.max_rows, options.width, options.height);
        let default_node = tree.default_node();

        group.throughput(Throughput::Elements(signals.len() as u64));
        group.bench_with_input(BenchmarkId::new("signals", signals.len()), &signals, |b, signals| {
            b.iter(|| {
                let mut writer = ScopeWriter::new(std::io::sink(), "bench", &default_node, &options);
                black_box(writer.write(&layout, signals).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_discover, bench_write_scope);

criterion_main!(benches);
