use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashmix_core::Device;

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for size in [32usize, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| Device::new(black_box(b"bench seed"), size).expect("device"));
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_uint64");
    let amount = 1 << 16;
    group.throughput(Throughput::Elements(amount as u64));
    for size in [32usize, 128, 1024] {
        let mut device = Device::new(b"bench seed", size).expect("device");
        let mut out = vec![0u64; amount];
        group.bench_with_input(BenchmarkId::new("bulk", size), &size, |b, _| {
            b.iter(|| device.fill_uint64(black_box(&mut out)));
        });
        let mut walker = Device::new(b"bench seed", size).expect("device");
        group.bench_with_input(BenchmarkId::new("walk", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0u64;
                for _ in 0..amount {
                    acc ^= walker.next_uint64();
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_floats(c: &mut Criterion) {
    let mut device = Device::new(b"bench seed", 128).expect("device");
    c.bench_function("extract_float64_4096", |b| {
        b.iter(|| black_box(device.extract_float64(4096)));
    });
}

criterion_group!(benches, bench_construction, bench_extract, bench_floats);
criterion_main!(benches);
