//! Aggregate statistics over a merchant's upstream transactions.

use castpay_sdk::objects::transactions::MerchantTransactionStats;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

const COMPLETED: &[&str] = &[
    "success",
    "successful",
    "completed",
    "complete",
    "settled",
    "confirmed",
    "paid",
];
const PENDING: &[&str] = &["pending", "processing", "initiated", "in_progress", "submitted"];
const FAILED: &[&str] = &[
    "failed",
    "failure",
    "error",
    "cancelled",
    "canceled",
    "rejected",
    "expired",
    "reversed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Completed,
    Pending,
    Failed,
}

impl StatusBucket {
    /// Classify a free-form status string. Unknown statuses have no bucket.
    pub fn classify(status: &str) -> Option<Self> {
        let status = status.trim().to_ascii_lowercase();
        let status = status.as_str();
        if COMPLETED.contains(&status) {
            Some(Self::Completed)
        } else if PENDING.contains(&status) {
            Some(Self::Pending)
        } else if FAILED.contains(&status) {
            Some(Self::Failed)
        } else {
            None
        }
    }
}

/// Parse an amount that may be a JSON number or a numeric string.
fn parse_amount(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("total volume overflows a decimal")]
    VolumeOverflow,
}

/// Sum amounts and bucket statuses. Unparseable amounts count as zero.
pub fn merchant_stats(transactions: &[Value]) -> Result<MerchantTransactionStats, StatsError> {
    let mut stats = MerchantTransactionStats {
        total_count: transactions.len() as u64,
        ..Default::default()
    };
    for tx in transactions {
        if let Some(amount) = parse_amount(tx.get("amount")) {
            stats.total_volume = stats
                .total_volume
                .checked_add(amount)
                .ok_or(StatsError::VolumeOverflow)?;
        }
        match tx
            .get("status")
            .and_then(Value::as_str)
            .and_then(StatusBucket::classify)
        {
            Some(StatusBucket::Completed) => stats.completed += 1,
            Some(StatusBucket::Pending) => stats.pending += 1,
            Some(StatusBucket::Failed) => stats.failed += 1,
            None => {}
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(StatusBucket::classify(" SUCCESS "), Some(StatusBucket::Completed));
        assert_eq!(StatusBucket::classify("In_Progress"), Some(StatusBucket::Pending));
        assert_eq!(StatusBucket::classify("Canceled"), Some(StatusBucket::Failed));
        assert_eq!(StatusBucket::classify("on-hold"), None);
    }

    #[test]
    fn test_merchant_stats() {
        let txs = vec![
            json!({"amount": "10.50", "status": "SUCCESS"}),
            json!({"amount": 4.5, "status": "paid"}),
            json!({"amount": "abc", "status": "pending"}),
            json!({"amount": "1e2", "status": "REVERSED"}),
            json!({"status": "on-hold"}),
        ];
        let stats = merchant_stats(&txs).unwrap();
        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.total_volume, Decimal::new(115, 0));
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(merchant_stats(&[]).unwrap(), MerchantTransactionStats::default());
    }

    #[test]
    fn test_volume_overflow_is_an_error() {
        let txs = vec![
            json!({"amount": "79228162514264337593543950335", "status": "success"}),
            json!({"amount": "79228162514264337593543950335", "status": "success"}),
        ];
        assert_eq!(merchant_stats(&txs), Err(StatsError::VolumeOverflow));
    }
}
