use serde::{Deserialize, Serialize};

/// A transfer record embedded in block data. `from == "network"` marks a
/// mining-reward mint with no corresponding debit. Nothing is validated at
/// this layer: amounts, addresses, and duplicates are accepted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_serialization_example() {
        let tx = Transaction::new("Alice", "Bob", 10);
        let json = serde_json::to_string(&tx).unwrap();
        let expected_json = r#"{"from":"Alice","to":"Bob","amount":10}"#;
        assert_eq!(json, expected_json);
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn transaction_equality_example() {
        let tx1 = Transaction::new("Alice", "Bob", 10);
        let tx2 = Transaction::new("Alice", "Bob", 10);
        let tx3 = Transaction::new("Alice", "Charlie", 10);
        assert_eq!(tx1, tx2);
        assert_ne!(tx1, tx3);
    }

    #[test]
    fn transaction_inequality_different_amount() {
        let tx1 = Transaction::new("Alice", "Bob", 10);
        let tx2 = Transaction::new("Alice", "Bob", 20);
        assert_ne!(tx1, tx2);
    }
}
