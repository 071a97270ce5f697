use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aescbc::{pad, BackendKind, CipherContext, BLOCK_SIZE};

fn configured(kind: BackendKind, rng: &mut ChaCha20Rng) -> CipherContext {
    let mut key = [0u8; 32];
    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    CipherContext::builder()
        .key(&key)
        .iv(&iv)
        .backend(kind)
        .build()
        .expect("valid configuration")
}

fn bench_engines(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut group = c.benchmark_group("encrypt");
    for size in [64usize, 4096] {
        let mut plaintext = vec![0u8; size];
        rng.fill_bytes(&mut plaintext);
        group.throughput(Throughput::Bytes(size as u64));
        for kind in BackendKind::ALL {
            let ctx = configured(kind, &mut rng);
            group.bench_with_input(BenchmarkId::new(kind.as_str(), size), &plaintext, |b, pt| {
                b.iter(|| ctx.encrypt(pt).expect("encrypt"));
            });
        }
    }
    group.finish();

    let mut group = c.benchmark_group("decrypt");
    for kind in BackendKind::ALL {
        let ctx = configured(kind, &mut rng);
        let ciphertext = ctx.encrypt(&[0x5a; 4096]).expect("encrypt");
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| ctx.decrypt(&ciphertext).expect("decrypt"));
        });
    }
    group.finish();
}

fn bench_padding(c: &mut Criterion) {
    let data = [0u8; 1000];
    c.bench_function("pkcs7_pad_1000", |b| {
        b.iter(|| pad(&data, BLOCK_SIZE).expect("pad"));
    });
}

criterion_group!(benches, bench_engines, bench_padding);
criterion_main!(benches);
