use chain_map::{ChainMap, Cursor};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_set_fresh_100k(c: &mut Criterion) {
    c.bench_function("chain::set_fresh_100k", |b| {
        b.iter_batched(
            ChainMap::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.set(&key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("chain::set_sized_fresh_100k", |b| {
        b.iter_batched(
            ChainMap::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.set_sized(&x.to_le_bytes(), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_presized_100k(c: &mut Criterion) {
    c.bench_function("chain::set_presized_100k", |b| {
        b.iter_batched(
            || ChainMap::<u64>::with_buckets(1 << 17).unwrap(),
            |mut m| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    m.set(&key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("chain::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainMap::new();
                let keys: Vec<String> = lcg(5).take(110_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    m.set(k, i as u64).unwrap();
                }
                // Precompute 10k unique indices via LCG
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in &to_remove {
                    black_box(m.remove(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_and_miss(c: &mut Criterion) {
    c.bench_function("chain::get_hit_10k_on_100k", |b| {
        let mut m = ChainMap::new();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.set(k, i as u64).unwrap();
        }
        // Precompute 10k random query keys using LCG
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k));
            }
        })
    });

    c.bench_function("chain::get_miss_10k_on_100k", |b| {
        let mut m = ChainMap::new();
        for (i, x) in lcg(11).take(100_000).enumerate() {
            m.set(&key(x), i as u64).unwrap();
        }
        let misses: Vec<String> = lcg(0xdead_beef).take(10_000).map(key).collect();
        b.iter(|| {
            for k in &misses {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    let mut m = ChainMap::new();
    for (i, x) in lcg(999).take(100_000).enumerate() {
        m.set(&key(x), i as u64).unwrap();
    }

    c.bench_function("chain::iter_all_100k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in &m {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("chain::cursor_all_100k", |b| {
        b.iter(|| {
            let mut cur = Cursor::new();
            let mut bytes = 0usize;
            while let Some(k) = m.next_key(&mut cur) {
                bytes += k.len();
            }
            black_box(bytes)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_set_fresh_100k, bench_set_presized_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_and_miss,
              bench_iterate_100k
}
criterion_main!(benches_insert, benches_ops);
