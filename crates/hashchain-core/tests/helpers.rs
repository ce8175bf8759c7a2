#![allow(dead_code)]

use hashchain_core::{Block, Chain};
use rand::distributions::Alphanumeric;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const T0: u64 = 1_600_000_000_000;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn random_string(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A chain with a fixed genesis and one block per payload, one second apart.
pub fn chain_with(payloads: &[&str]) -> Chain {
    let mut chain = Chain::with_genesis_at(T0);
    for (i, data) in payloads.iter().enumerate() {
        chain
            .append_at(*data, T0 + (i as u64 + 1) * 1_000)
            .expect("append to a fresh chain");
    }
    chain
}

pub fn snapshot(chain: &Chain) -> Vec<Block> {
    chain.blocks().to_vec()
}
