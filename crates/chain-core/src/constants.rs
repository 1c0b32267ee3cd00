pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

/// Leading `'0'` hex characters required of a sealed block hash.
pub const DEFAULT_DIFFICULTY: usize = 4;
/// Amount minted to the miner's address per mining cycle.
pub const DEFAULT_MINING_REWARD: u64 = 10;

/// Sender address of reward mints; carries no corresponding debit.
pub const NETWORK_ADDRESS: &str = "network";

pub const GENESIS_DATA: &str = "Genesis Block";
pub const GENESIS_PREVIOUS_HASH: &str = "0";
