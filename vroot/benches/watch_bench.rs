use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use vroot::fs::MemoryFileSystem;
use vroot::watch::{WatchConfig, WatchListener, Watcher};

struct Discard;

impl WatchListener for Discard {}

fn populated(files: usize) -> Arc<MemoryFileSystem> {
    let fs = Arc::new(MemoryFileSystem::new());
    for i in 0..files {
        fs.write_file(&format!("/w/d{}/f{i}.txt", i % 10), 1);
    }
    fs
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for files in [100, 1_000] {
        let fs = populated(files);
        let config = WatchConfig::builder("/w").recursive(true).build().unwrap();
        let mut watcher = Watcher::new(config, Arc::clone(&fs), Discard);
        watcher.build().unwrap();

        group.bench_with_input(BenchmarkId::new("unchanged", files), &files, |b, _| {
            b.iter(|| watcher.process().unwrap());
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let fs = populated(1_000);

    c.bench_function("build_recursive_1000", |b| {
        b.iter(|| {
            let config = WatchConfig::builder("/w").recursive(true).build().unwrap();
            let mut watcher = Watcher::new(config, Arc::clone(&fs), Discard);
            watcher.build().unwrap();
        });
    });
}

criterion_group!(benches, bench_tick, bench_build);
criterion_main!(benches);
