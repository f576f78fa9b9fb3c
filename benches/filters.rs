//! Benchmarks for the two filters.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use semline::{run, Engine, FilterConfig, Mdline, Semln};

fn sample_text(size: usize) -> String {
    // Wrapped prose with paragraph breaks
    let lines = [
        "The quick brown fox jumps over the lazy dog. Pack my\n",
        "box with five dozen liquor jugs. How vexingly quick\n",
        "daft zebras jump! Mr. Jock, TV quiz Ph.D., bags few lynx.\n",
        "\n",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(lines[i % lines.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn bench_mdline(c: &mut Criterion) {
    let mut group = c.benchmark_group("mdline");
    let engine = Engine::new(FilterConfig::default()).unwrap();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("unwrap", size), &text, |b, text| {
            b.iter(|| {
                let mut output = Vec::with_capacity(text.len());
                run(&mut Mdline::new(&engine), black_box(text.as_bytes()), &mut output, 8192)
                    .unwrap();
                output
            })
        });
    }

    group.finish();
}

fn bench_semln(c: &mut Criterion) {
    let mut group = c.benchmark_group("semln");
    let engine = Engine::new(FilterConfig::default()).unwrap();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("sentences", size), &text, |b, text| {
            b.iter(|| {
                let mut output = Vec::with_capacity(text.len());
                run(&mut Semln::new(&engine), black_box(text.as_bytes()), &mut output, 8192)
                    .unwrap();
                output
            })
        });
    }

    group.finish();
}

fn bench_buffer_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_size");
    let engine = Engine::new(FilterConfig::default()).unwrap();
    let text = sample_text(50_000);

    for capacity in [64, 1024, 8192, 65_536] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("semln", capacity), &capacity, |b, &capacity| {
            b.iter(|| {
                let mut output = Vec::with_capacity(text.len());
                run(&mut Semln::new(&engine), black_box(text.as_bytes()), &mut output, capacity)
                    .unwrap();
                output
            })
        });
    }

    group.finish();
}

/// One paragraph with no blank lines: the whole input stays held back.
fn bench_single_paragraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_paragraph");
    let engine = Engine::new(FilterConfig::default()).unwrap();
    let line = "wrapped prose that never reaches a blank line, on and on\n";

    for size in [100_000, 200_000, 400_000] {
        let text = line.repeat(size / line.len());

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("semln", size), &text, |b, text| {
            b.iter(|| {
                let mut output = Vec::with_capacity(text.len());
                run(&mut Semln::new(&engine), black_box(text.as_bytes()), &mut output, 8192)
                    .unwrap();
                output
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mdline,
    bench_semln,
    bench_buffer_size,
    bench_single_paragraph
);
criterion_main!(benches);
