#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashSet;

use bucket_table::{BucketTable, DefaultEntryHasher, LinearProbe, QuadraticProbe, TableConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const TABLE_CAPACITY: usize = 2048;
const BUCKET_CAPACITY: usize = 16;
const SAMPLE_SIZE: usize = 10;

fn bucket_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec(any::<String>(), ITEMS_AMOUNT).new_tree(&mut runner).unwrap().current();
    let config = TableConfig::new(TABLE_CAPACITY, BUCKET_CAPACITY).with_overflow(true);

    let mut group = c.benchmark_group("Bucket table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("linear insert", |b| {
        b.iter(|| {
            let mut table = BucketTable::new(config, DefaultEntryHasher, LinearProbe).unwrap();
            for item in items.clone() {
                table.insert(item);
            }
            table
        });
    });
    group.bench_function("quadratic insert", |b| {
        b.iter(|| {
            let mut table = BucketTable::new(config, DefaultEntryHasher, QuadraticProbe).unwrap();
            for item in items.clone() {
                table.insert(item);
            }
            table
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut set = HashSet::with_capacity(TABLE_CAPACITY);
            for item in items.clone() {
                set.insert(item);
            }
            set
        });
    });

    let mut linear = BucketTable::new(config, DefaultEntryHasher, LinearProbe).unwrap();
    let mut quadratic = BucketTable::new(config, DefaultEntryHasher, QuadraticProbe).unwrap();
    let mut rust_set = HashSet::with_capacity(TABLE_CAPACITY);
    for item in &items {
        linear.insert(item.clone());
        quadratic.insert(item.clone());
        rust_set.insert(item.clone());
    }

    group.bench_function("linear find", |b| {
        b.iter(|| {
            for item in &items {
                let _ = linear.find(item);
            }
        });
    });
    group.bench_function("quadratic find", |b| {
        b.iter(|| {
            for item in &items {
                let _ = quadratic.find(item);
            }
        });
    });
    group.bench_function("rust std find", |b| {
        b.iter(|| {
            for item in &items {
                let _ = rust_set.get(item);
            }
        });
    });
    group.bench_function("linear stats", |b| b.iter(|| linear.stats()));
    group.finish();
}

criterion_group!(benches, bucket_table_benches);

criterion_main!(benches);
