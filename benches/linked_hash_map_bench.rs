use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use linked_hashmap::{Cursor, LinkedHashMap};
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

fn filled(seed: u64, n: usize) -> LinkedHashMap<String, u64> {
    let mut m = LinkedHashMap::new();
    for (i, x) in lcg(seed).take(n).enumerate() {
        m.insert(key(x), i as u64);
    }
    m
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("linked::insert_fresh_100k", |b| {
        b.iter_batched(
            LinkedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    c.bench_function("linked::insert_presized_100k", |b| {
        b.iter_batched(
            || LinkedHashMap::<String, u64>::with_capacity(100_000),
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_reinsert_existing_100k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(2).take(100_000).map(key).collect();
    c.bench_function("linked::reinsert_existing_100k", |b| {
        b.iter_batched(
            || filled(2, 100_000),
            |mut m| {
                for k in &keys {
                    let _ = m.insert(k.clone(), 0);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_miss(c: &mut Criterion) {
    let m = filled(3, 100_000);
    let hits: Vec<String> = lcg(3).take(10_000).map(key).collect();
    let misses: Vec<String> = lcg(4).take(10_000).map(key).collect();
    c.bench_function("linked::find_hit_10k", |b| {
        b.iter(|| {
            for k in &hits {
                black_box(m.find(k.as_str()));
            }
        })
    });
    c.bench_function("linked::find_miss_10k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(m.find(k.as_str()));
            }
        })
    });
}

fn bench_erase_random_10k(c: &mut Criterion) {
    c.bench_function("linked::erase_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let m = filled(5, 110_000);
                let n = m.len() as u64;
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert(s % n);
                }
                let targets: Vec<Cursor> = m
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| sel.contains(&(*i as u64)))
                    .filter_map(|(_, (k, _))| m.find(k.as_str()))
                    .collect();
                (m, targets)
            },
            |(mut m, targets)| {
                for c in targets {
                    let _ = m.erase(c);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    let m = filled(6, 100_000);
    c.bench_function("linked::iter_100k", |b| {
        b.iter(|| black_box(m.values().sum::<u64>()))
    });
    c.bench_function("linked::cursor_walk_100k", |b| {
        b.iter(|| {
            let mut cur = m.begin();
            let mut acc = 0u64;
            while let Ok(v) = cur.value(&m) {
                acc = acc.wrapping_add(*v);
                let _ = cur.advance(&m);
            }
            black_box(acc)
        })
    });
}

fn config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = config();
    targets =
        bench_insert_fresh_100k,
        bench_insert_presized_100k,
        bench_reinsert_existing_100k,
        bench_find_hit_miss,
        bench_erase_random_10k,
        bench_iterate_100k
}
criterion_main!(benches);
