use chain_core::{Block, BlockData, Transaction};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_pow(c: &mut Criterion) {
    c.bench_function("mine_block_difficulty_3", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        let txs: Vec<Transaction> = (0..10)
            .map(|i| Transaction::new(format!("alice-{i}"), "bob", rng.gen_range(1..10)))
            .collect();
        let block = Block::new(1, 1_600_000_000_000, BlockData::Transactions(txs), "0");

        b.iter(|| {
            let mut candidate = block.clone();
            candidate.mine(3);
            candidate
        });
    });
}

criterion_group!(benches, bench_pow);
criterion_main!(benches);
