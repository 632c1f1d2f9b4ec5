use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memlru::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_hit", |b| {
        let cache: LruCache<Vec<u8>> = LruCache::new(1024 * 1024);
        let keys: Vec<String> = (0..100).map(|i| format!("key:{i}")).collect();

        for key in &keys {
            cache.add(key.as_str(), vec![b'x'; 1024]).unwrap();
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(&keys[counter % 100]));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache: LruCache<Vec<u8>> = LruCache::new(100 * 1024);
        let keys: Vec<String> = (0..200).map(|i| format!("key:{i}")).collect();

        for key in &keys[..100] {
            cache.add(key.as_str(), vec![b'x'; 1024]).unwrap();
        }

        let mut counter = 0usize;
        b.iter(|| {
            let key = &keys[counter % 200];
            if counter.is_multiple_of(2) {
                black_box(cache.get(key));
            } else {
                black_box(cache.add(key.as_str(), vec![b'x'; 1024]).ok());
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_evicting_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("evicting_add");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_1kb_full_cache", |b| {
        // Room for 10 entries, so every add past the tenth evicts
        let cache: LruCache<Vec<u8>> = LruCache::new(10 * 1024);

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.add(counter.to_string(), vec![b'x'; 1024]).ok());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_evicting_add
);
criterion_main!(benches);
