//! Transaction records.
//!
//! - `GET  /transactions?id=|txHash=|merchantId=` – read one row, or a
//!   merchant's upstream history with stats
//! - `POST /transactions` – record a transaction
//! - `PUT  /transactions` – settle the single pending row for a tx hash

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use castpay_core::entities::transaction::{NewTransaction, TransactionStatus, TransactionUpdate};
use castpay_core::stats::merchant_stats;
use castpay_sdk::objects::transactions::{
    CreateTransactionBody, MerchantTransactionsResponse, TransactionQuery,
    TransactionStatus as SdkTransactionStatus, UpdateTransactionBody,
};
use uuid::Uuid;

use super::error::{ApiError, ValidationError};
use super::extractors::{Schema, ValidatedJson, ValidatedQuery, decimal, optional, required};
use crate::state::AppState;

fn status(value: Option<String>) -> Result<TransactionStatus, ValidationError> {
    let status = required(value, "status")?;
    status
        .parse::<SdkTransactionStatus>()
        .map(Into::into)
        .map_err(|e| ValidationError::new(e.to_string()))
}

/// Which row(s) a `GET /transactions` asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionLookup {
    Id(Uuid),
    TxHash(String),
    Merchant(String),
}

impl Schema for TransactionLookup {
    type Raw = TransactionQuery;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        if let Some(id) = optional(raw.id) {
            return Uuid::parse_str(&id)
                .map(Self::Id)
                .map_err(|_| ValidationError::new("id must be a UUID"));
        }
        if let Some(tx_hash) = optional(raw.tx_hash) {
            return Ok(Self::TxHash(tx_hash));
        }
        if let Some(merchant_id) = optional(raw.merchant_id) {
            return Ok(Self::Merchant(merchant_id));
        }
        Err(ValidationError::new(
            "one of id, txHash or merchantId is required",
        ))
    }
}

pub(super) async fn get_transactions(
    State(state): State<AppState>,
    ValidatedQuery(lookup): ValidatedQuery<TransactionLookup>,
) -> Result<Response, ApiError> {
    let record = match lookup {
        TransactionLookup::Id(id) => state.ledger.get(id).await?,
        TransactionLookup::TxHash(tx_hash) => state.ledger.get_by_tx_hash(&tx_hash).await?,
        TransactionLookup::Merchant(merchant_id) => {
            let transactions = state.merchant_api.transactions(&merchant_id).await?;
            let stats =
                merchant_stats(&transactions).map_err(|e| ApiError::Internal(e.to_string()))?;
            return Ok(Json(MerchantTransactionsResponse {
                merchant_id,
                transactions,
                stats,
            })
            .into_response());
        }
    };
    Ok(Json(record.to_response()).into_response())
}

pub struct CreateTransaction(pub NewTransaction);

impl Schema for CreateTransaction {
    type Raw = CreateTransactionBody;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(Self(NewTransaction {
            merchant_id: required(raw.merchant_id, "merchantId")?,
            wallet: required(raw.wallet, "wallet")?,
            amount: decimal(raw.amount, "amount")?,
            currency: required(raw.currency, "currency")?,
            status: status(raw.status)?,
            tx_hash: required(raw.tx_hash, "txHash")?,
            recipient: optional(raw.recipient),
            order_id: optional(raw.order_id),
            kind: optional(raw.kind),
            network: optional(raw.network),
        }))
    }
}

pub(super) async fn create_transaction(
    State(state): State<AppState>,
    ValidatedJson(CreateTransaction(transaction)): ValidatedJson<CreateTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.ledger.create(transaction).await?;
    Ok((StatusCode::CREATED, Json(record.to_response())))
}

pub struct SettleTransaction {
    pub tx_hash: String,
    pub update: TransactionUpdate,
}

impl Schema for SettleTransaction {
    type Raw = UpdateTransactionBody;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Ok(Self {
            tx_hash: required(raw.tx_hash, "txHash")?,
            update: TransactionUpdate {
                status: status(raw.status)?,
                recipient: optional(raw.recipient),
                order_id: optional(raw.order_id),
                kind: optional(raw.kind),
                network: optional(raw.network),
            },
        })
    }
}

pub(super) async fn update_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SettleTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .ledger
        .settle_pending(&request.tx_hash, request.update)
        .await?;
    Ok(Json(record.to_response()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_precedence() {
        let id = Uuid::now_v7();
        let lookup = TransactionLookup::parse(TransactionQuery {
            id: Some(id.to_string()),
            tx_hash: Some("0x1".to_string()),
            merchant_id: Some("m".to_string()),
        });
        assert_eq!(lookup, Ok(TransactionLookup::Id(id)));

        let lookup = TransactionLookup::parse(TransactionQuery {
            id: Some(" ".to_string()),
            tx_hash: None,
            merchant_id: Some("m".to_string()),
        });
        assert_eq!(lookup, Ok(TransactionLookup::Merchant("m".to_string())));

        assert!(TransactionLookup::parse(TransactionQuery::default()).is_err());
        assert!(
            TransactionLookup::parse(TransactionQuery {
                id: Some("not-a-uuid".to_string()),
                ..Default::default()
            })
            .is_err()
        );
    }

    #[test]
    fn test_create_requires_known_status() {
        let raw = CreateTransactionBody {
            merchant_id: Some("m".to_string()),
            wallet: Some("0xabc".to_string()),
            amount: Some(serde_json::json!("5")),
            currency: Some("USDC".to_string()),
            status: Some("settled".to_string()),
            tx_hash: Some("0x1".to_string()),
            ..Default::default()
        };
        assert!(CreateTransaction::parse(raw.clone()).is_err());

        let raw = CreateTransactionBody {
            status: Some("pending".to_string()),
            ..raw
        };
        let CreateTransaction(tx) = CreateTransaction::parse(raw).unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.recipient, None);
    }
}
