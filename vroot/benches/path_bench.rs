use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vroot::path::{clean_path, make_path, AliasTable, PathResolver};

fn bench_clean_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_path");

    for (name, input) in [
        ("already_clean", "/srv/site/storage/public/x.png"),
        ("with_dots", "/a/b/../c/./d"),
        ("many_dots", "/a/b/c/d/../../e/f/../../../g"),
        ("backslashes", "C:\\site\\public\\..\\x.png"),
        ("remote", "https://cdn.example.com/a/../b"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, &path| {
            b.iter(|| clean_path(black_box(path)));
        });
    }

    group.finish();
}

fn bench_make_path(c: &mut Criterion) {
    c.bench_function("make_path", |b| {
        b.iter(|| make_path(black_box(&["/srv/site/", "storage//", "public", "x.png"])));
    });
}

fn bench_aliases(c: &mut Criterion) {
    let mut group = c.benchmark_group("aliases");

    let mut table = AliasTable::new();
    for i in 0..16 {
        table.insert(&format!("k{i}"), &format!("storage/bucket{i}"));
    }
    table.insert("img", "pub/images");
    table.insert("pub", "k3/public");

    group.bench_function("expand_miss", |b| {
        b.iter(|| table.expand(black_box("other/x.png")));
    });

    group.bench_function("expand_chain", |b| {
        b.iter(|| table.expand(black_box("img/x.png")));
    });

    group.bench_function("reduce_chain", |b| {
        b.iter(|| table.reduce(black_box("storage/bucket3/public/images/x.png")));
    });

    group.finish();
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");

    let dir = tempfile::tempdir().unwrap();
    let resolver = PathResolver::new(dir.path())
        .unwrap()
        .with_working_dir("/docs")
        .with_alias("img", "pub/images")
        .with_alias("pub", "storage/public");
    let internal = resolver.to_internal_path("img/logo.png");

    for (name, input) in [
        ("plain", "a/b/c.txt"),
        ("dot_relative", "./guide/../intro.md"),
        ("aliased", "img/logo.png"),
        ("escaping", "../../../../etc/passwd"),
    ] {
        group.bench_with_input(BenchmarkId::new("to_internal", name), &input, |b, &path| {
            b.iter(|| resolver.to_internal_path(black_box(path)));
        });
    }

    group.bench_function("to_external", |b| {
        b.iter(|| resolver.to_external_path(black_box(&internal)));
    });

    group.bench_function("to_filesystem", |b| {
        b.iter(|| resolver.to_filesystem_path(black_box(&internal)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_clean_path,
    bench_make_path,
    bench_aliases,
    bench_resolver
);
criterion_main!(benches);
