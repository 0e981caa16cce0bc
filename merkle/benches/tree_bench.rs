use criterion::{black_box, criterion_group, criterion_main, Criterion};

use redeem_types::{Address, BurnRecord};

fn records(n: usize) -> Vec<BurnRecord> {
    (0..n)
        .map(|i| {
            let mut addr = [0u8; 20];
            addr[12..].copy_from_slice(&(i as u64).to_be_bytes());
            BurnRecord::new(Address::new(addr), [i as u64 * 2, i as u64 * 2 + 1])
        })
        .collect()
}

fn build_1k_bench(c: &mut Criterion) {
    let input = records(1_000);

    c.bench_function("build_1k_records", |b| {
        b.iter(|| redeem_merkle::build(black_box(&input)))
    });
}

fn verify_bench(c: &mut Criterion) {
    let input = records(1_000);
    let out = redeem_merkle::build(&input);
    let root = out.tree.root().expect("non-empty tree");
    let leaf = out.tree.leaves()[500];
    let proof = out.tree.proof(500).expect("leaf in range");

    c.bench_function("verify_proof_depth_10", |b| {
        b.iter(|| redeem_merkle::verify_proof(black_box(&root), &leaf, &proof))
    });
}

criterion_group!(benches, build_1k_bench, verify_bench);
criterion_main!(benches);
