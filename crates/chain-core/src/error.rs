use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Stored chain JSON is malformed, or a block's data string is neither
    /// the genesis marker nor a transaction array.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Capped proof-of-work search ran out of nonce budget. Never produced
    /// by the default unbounded search.
    #[error("mining exhausted after {iterations} nonces at difficulty {difficulty}")]
    MiningExhausted { difficulty: usize, iterations: u64 },
}
