//! Transaction API request and response types.
//!
//! Request bodies are deliberately loose (every field optional, amounts as
//! raw JSON) so that the server can report *which* field is missing or
//! malformed instead of a generic deserialization failure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle status of a persisted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TransactionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "SUCCESS" => Ok(TransactionStatus::Success),
            "FAILED" => Ok(TransactionStatus::Failed),
            "CANCELLED" | "CANCELED" => Ok(TransactionStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// A persisted transaction as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub merchant_id: String,
    pub wallet: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub tx_hash: String,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub network: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Raw body of `POST /transactions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionBody {
    pub merchant_id: Option<String>,
    pub wallet: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub tx_hash: Option<String>,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub network: Option<String>,
}

/// Raw body of `PUT /transactions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionBody {
    pub tx_hash: Option<String>,
    pub status: Option<String>,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub network: Option<String>,
}

/// Raw query of `GET /transactions`. Exactly one selector is honored, in
/// the order `id`, `txHash`, `merchantId`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub id: Option<String>,
    pub tx_hash: Option<String>,
    pub merchant_id: Option<String>,
}

/// Aggregate figures over a merchant's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantTransactionStats {
    pub total_volume: Decimal,
    pub total_count: u64,
    pub completed: u64,
    pub pending: u64,
    pub failed: u64,
}

/// Response of `GET /transactions?merchantId=..`.
///
/// Transactions are passed through from the upstream merchant API untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantTransactionsResponse {
    pub merchant_id: String,
    pub transactions: Vec<serde_json::Value>,
    pub stats: MerchantTransactionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "pending".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Pending)
        );
        assert_eq!(
            " Success ".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Success)
        );
        assert_eq!(
            "canceled".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Cancelled)
        );
        assert!("done".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TransactionStatus::Failed).unwrap();
        assert_eq!(json, "\"FAILED\"");
    }
}
