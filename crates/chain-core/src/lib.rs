//! Single-node append-only ledger: a chain of hash-linked blocks sealed by a
//! proof-of-work search, with integrity verification and balance replay over
//! the embedded transaction records. No network surface, no persistence
//! beyond a JSON round-trip of the chain.

pub mod block;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use block::{now_millis, Block, BlockData};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use transaction::Transaction;
