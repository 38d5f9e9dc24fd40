//! Benchmarks.

#![allow(missing_docs)]

use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ctaes::{aes16, Block, BLOCK_SIZE};

macro_rules! bench_aes {
    ($name:ident, $aes:ty) => {
        fn $name(c: &mut Criterion) {
            let mut g = c.benchmark_group(stringify!($name));

            g.throughput(Throughput::Elements(1))
                .bench_function("new", |b| {
                    let key = [0u8; <$aes>::KEY_SIZE];
                    b.iter(|| {
                        black_box(<$aes>::new(black_box(&key)));
                    });
                });

            g.throughput(Throughput::Bytes(BLOCK_SIZE as u64))
                .bench_function("encrypt_block", |b| {
                    let aes = <$aes>::new(&[0u8; <$aes>::KEY_SIZE]);
                    let mut block = Block::default();
                    b.iter(|| black_box(&aes).encrypt_block(black_box(&mut block)));
                    black_box(&block);
                });

            g.throughput(Throughput::Bytes(BLOCK_SIZE as u64))
                .bench_function("decrypt_block", |b| {
                    let aes = <$aes>::new(&[0u8; <$aes>::KEY_SIZE]);
                    let mut block = Block::default();
                    b.iter(|| black_box(&aes).decrypt_block(black_box(&mut block)));
                    black_box(&block);
                });

            g.finish();
        }
    };
}
bench_aes!(bench_aes128, aes16::Aes128);
bench_aes!(bench_aes192, aes16::Aes192);
bench_aes!(bench_aes256, aes16::Aes256);

fn benchmarks(c: &mut Criterion) {
    bench_aes128(c);
    bench_aes192(c);
    bench_aes256(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
