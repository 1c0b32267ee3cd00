use crate::constants::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};
use crate::error::LedgerError;
use crate::transaction::Transaction;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as u64
}

/// Block payload. On the wire this is a plain string: the genesis marker, or
/// a compact JSON array of transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockData {
    Genesis,
    Transactions(Vec<Transaction>),
}

impl BlockData {
    pub fn to_payload(&self) -> String {
        match self {
            BlockData::Genesis => GENESIS_DATA.to_string(),
            BlockData::Transactions(txs) => serde_json::to_string(txs).unwrap(),
        }
    }

    pub fn from_payload(raw: &str) -> Result<Self, LedgerError> {
        if raw == GENESIS_DATA {
            return Ok(BlockData::Genesis);
        }
        let txs: Vec<Transaction> = serde_json::from_str(raw)?;
        Ok(BlockData::Transactions(txs))
    }

    /// Genesis carries no transactions; balance replay skips it.
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            BlockData::Genesis => &[],
            BlockData::Transactions(txs) => txs,
        }
    }
}

impl Serialize for BlockData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_payload())
    }
}

impl<'de> Deserialize<'de> for BlockData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BlockData::from_payload(&raw).map_err(D::Error::custom)
    }
}

/// A single sealed unit of the ledger, linked to its predecessor by hash.
/// `hash` is kept in step with the other fields at all times: construction
/// computes it, and every mutation path recomputes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: u64,
    pub data: BlockData,
    pub previous_hash: String,
    pub hash: String,
    pub nonce: u64,
}

impl Block {
    /// A fresh, unsealed block: `nonce = 0`, hash computed immediately.
    pub fn new(
        index: u64,
        timestamp: u64,
        data: BlockData,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            data,
            previous_hash: previous_hash.into(),
            hash: String::new(),
            nonce: 0,
        };
        block.hash = block.calculate_hash();
        block
    }

    pub fn genesis() -> Self {
        Self::new(0, now_millis(), BlockData::Genesis, GENESIS_PREVIOUS_HASH)
    }

    /// Restores a stored block verbatim, trusting the persisted `hash` and
    /// `nonce` rather than recomputing them from zero. Deserialization goes
    /// through here; freshly mined blocks never do.
    pub fn from_parts(
        index: u64,
        timestamp: u64,
        data: BlockData,
        previous_hash: String,
        hash: String,
        nonce: u64,
    ) -> Self {
        Self {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
            nonce,
        }
    }

    /// SHA-256 hex digest over `index`, `previous_hash`, `timestamp`, the
    /// JSON-quoted data payload, and `nonce`, concatenated in that order with
    /// numbers in decimal string form. Deterministic and side-effect free;
    /// re-running it against a stored block is the basis of tamper detection.
    pub fn calculate_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_string());
        hasher.update(&self.previous_hash);
        hasher.update(self.timestamp.to_string());
        hasher.update(serde_json::to_string(&self.data.to_payload()).unwrap());
        hasher.update(self.nonce.to_string());
        hex::encode(hasher.finalize())
    }

    /// Sequential proof-of-work search: increments `nonce` and recomputes
    /// `hash` until `difficulty` leading `'0'` hex characters prefix it.
    /// Difficulty 0 seals immediately with `nonce = 0`. Unbounded.
    pub fn mine(&mut self, difficulty: usize) {
        let target = "0".repeat(difficulty);
        while !self.hash.starts_with(&target) {
            self.nonce += 1;
            self.hash = self.calculate_hash();
        }
        info!(
            "Mined block {} with nonce {} and hash {}",
            self.index, self.nonce, self.hash
        );
    }

    /// `mine` with a nonce budget; exceeding it reports `MiningExhausted`
    /// instead of searching forever.
    pub fn mine_capped(&mut self, difficulty: usize, cap: u64) -> Result<(), LedgerError> {
        let target = "0".repeat(difficulty);
        let mut iterations = 0u64;
        while !self.hash.starts_with(&target) {
            if iterations == cap {
                return Err(LedgerError::MiningExhausted {
                    difficulty,
                    iterations,
                });
            }
            self.nonce += 1;
            self.hash = self.calculate_hash();
            iterations += 1;
        }
        info!(
            "Mined block {} with nonce {} and hash {}",
            self.index, self.nonce, self.hash
        );
        Ok(())
    }

    /// Points the block at a new predecessor and recomputes the hash so the
    /// block never holds a stale one.
    pub(crate) fn relink(&mut self, previous_hash: String) {
        self.previous_hash = previous_hash;
        self.hash = self.calculate_hash();
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Stored {
            index: u64,
            timestamp: u64,
            data: BlockData,
            previous_hash: String,
            hash: String,
            nonce: u64,
        }
        let s = Stored::deserialize(deserializer)?;
        Ok(Block::from_parts(
            s.index,
            s.timestamp,
            s.data,
            s.previous_hash,
            s.hash,
            s.nonce,
        ))
    }
}
