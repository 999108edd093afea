use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

fn vroot() -> Command {
    let mut cmd = Command::cargo_bin("vroot").expect("failed to locate vroot binary");
    cmd.env_remove("VROOT_ROOT").env_remove("VROOT_CONFIG");
    cmd
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let output = vroot().arg("--version").output().expect("failed to run vroot");
            black_box(output);
        });
    });
}

fn bench_cli_clean(c: &mut Criterion) {
    let paths: Vec<String> = (0..200).map(|i| format!("/a/./b{i}/../c//d{i}/")).collect();

    c.bench_function("cli_clean_200", |b| {
        b.iter(|| {
            let status = vroot()
                .arg("clean")
                .args(&paths)
                .stdout(Stdio::null())
                .status()
                .expect("failed to execute vroot clean");
            black_box(status.success());
        });
    });
}

fn bench_cli_resolve_with_aliases(c: &mut Criterion) {
    let root = TempDir::new().expect("failed to create temp dir");
    let mut yaml = String::from("aliases:\n");
    for i in 0..50 {
        yaml.push_str(&format!("  - key: a{i}\n    target: storage/s{i}\n"));
    }
    std::fs::write(root.path().join("vroot.yaml"), yaml).expect("failed to write config");

    let paths: Vec<String> = (0..50).map(|i| format!("a{i}/file{i}.png")).collect();

    c.bench_function("cli_resolve_50_aliases", |b| {
        b.iter(|| {
            let status = vroot()
                .current_dir(root.path())
                .arg("--root")
                .arg(root.path())
                .arg("resolve")
                .args(&paths)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .expect("failed to execute vroot resolve");
            black_box(status.success());
        });
    });
}

criterion_group!(
    cli_benches,
    bench_cli_startup,
    bench_cli_clean,
    bench_cli_resolve_with_aliases
);
criterion_main!(cli_benches);
