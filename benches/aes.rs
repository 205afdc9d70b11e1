//! Benchmarks for the software AES block cipher
//!
//! Covers key expansion, single-block latency, and multi-block throughput
//! (the paired bitsliced pipeline) for all three key sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use aes_ct::{Aes128, Aes192, Aes256, BlockCipher};

fn bench_key_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_key_expansion");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    group.bench_function("aes128", |b| {
        let mut key = [0u8; 16];
        rng.fill(&mut key);

        b.iter(|| {
            let mut cipher = Aes128::new();
            cipher.set_key(black_box(&key)).unwrap();
            black_box(cipher);
        });
    });

    group.bench_function("aes192", |b| {
        let mut key = [0u8; 24];
        rng.fill(&mut key);

        b.iter(|| {
            let mut cipher = Aes192::new();
            cipher.set_key(black_box(&key)).unwrap();
            black_box(cipher);
        });
    });

    group.bench_function("aes256", |b| {
        let mut key = [0u8; 32];
        rng.fill(&mut key);

        b.iter(|| {
            let mut cipher = Aes256::new();
            cipher.set_key(black_box(&key)).unwrap();
            black_box(cipher);
        });
    });

    group.finish();
}

fn bench_block_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_block_encrypt");
    group.throughput(Throughput::Bytes(16));

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    {
        let mut key = [0u8; 16];
        rng.fill(&mut key);
        let mut cipher = Aes128::new();
        cipher.set_key(&key).unwrap();

        group.bench_function("aes128", |b| {
            let mut block = [0u8; 16];
            rng.fill(&mut block);

            b.iter(|| {
                let mut data = block;
                cipher.encrypt_blocks(black_box(&mut data)).unwrap();
                black_box(data);
            });
        });
    }

    {
        let mut key = [0u8; 32];
        rng.fill(&mut key);
        let mut cipher = Aes256::new();
        cipher.set_key(&key).unwrap();

        group.bench_function("aes256", |b| {
            let mut block = [0u8; 16];
            rng.fill(&mut block);

            b.iter(|| {
                let mut data = block;
                cipher.encrypt_blocks(black_box(&mut data)).unwrap();
                black_box(data);
            });
        });
    }

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    const BULK: usize = 1024;

    let mut group = c.benchmark_group("aes_bulk");
    group.throughput(Throughput::Bytes(BULK as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut key = [0u8; 16];
    rng.fill(&mut key);
    let mut cipher = Aes128::new();
    cipher.set_key(&key).unwrap();

    let mut data = vec![0u8; BULK];
    rng.fill(&mut data[..]);

    // Even block counts keep the double-wide S-box pipeline busy
    group.bench_function("aes128_encrypt_64_blocks", |b| {
        b.iter(|| {
            let mut buf = data.clone();
            cipher.encrypt_blocks(black_box(&mut buf)).unwrap();
            black_box(buf);
        });
    });

    group.bench_function("aes128_decrypt_64_blocks", |b| {
        let mut ct = data.clone();
        cipher.encrypt_blocks(&mut ct).unwrap();

        b.iter(|| {
            let mut buf = ct.clone();
            cipher.decrypt_blocks(black_box(&mut buf)).unwrap();
            black_box(buf);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_key_expansion, bench_block_encrypt, bench_bulk);
criterion_main!(benches);
