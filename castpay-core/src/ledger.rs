//! Transaction ledger.
//!
//! The ledger is the facade the API talks to. It owns the single
//! data-integrity rule of the transactions table: a transaction is settled
//! by tx hash, and settling requires exactly one `PENDING` row for that hash.
//!
//! The pending lookup and the update are two separate statements with no
//! database transaction around them. Two callers settling the same hash at
//! the same time can both pass the lookup; the second update then
//! overwrites the first.

use crate::entities::transaction::{
    NewTransaction, TransactionRecord, TransactionStatus, TransactionUpdate,
};
use crate::store::{StoreError, TransactionStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors produced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No matching transaction exists.
    #[error("transaction not found")]
    NotFound,

    /// More than one pending transaction shares the tx hash.
    #[error("{count} pending transactions share tx hash {tx_hash}")]
    Conflict { tx_hash: String, count: usize },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create/read/update facade over a [`TransactionStore`].
#[derive(Clone)]
pub struct TransactionLedger {
    store: Arc<dyn TransactionStore>,
}

impl TransactionLedger {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Persist a new transaction.
    pub async fn create(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, LedgerError> {
        let record = self.store.insert(transaction).await?;
        info!(
            id = %record.id,
            tx_hash = %record.tx_hash,
            merchant_id = %record.merchant_id,
            "Transaction recorded"
        );
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<TransactionRecord, LedgerError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(LedgerError::NotFound)
    }

    pub async fn get_by_tx_hash(&self, tx_hash: &str) -> Result<TransactionRecord, LedgerError> {
        self.store
            .latest_by_tx_hash(tx_hash)
            .await?
            .ok_or(LedgerError::NotFound)
    }

    /// Settle the single pending transaction carrying `tx_hash`.
    ///
    /// Returns the row as found by `(tx_hash, update.status)` after the
    /// write. Nothing is written when zero or several pending rows match.
    pub async fn settle_pending(
        &self,
        tx_hash: &str,
        update: TransactionUpdate,
    ) -> Result<TransactionRecord, LedgerError> {
        let pending = self
            .store
            .by_tx_hash_and_status(tx_hash, TransactionStatus::Pending)
            .await?;

        let target = match pending.as_slice() {
            [] => return Err(LedgerError::NotFound),
            [only] => only.id,
            many => {
                warn!(
                    tx_hash = %tx_hash,
                    count = many.len(),
                    "Refusing to settle: multiple pending transactions share a tx hash"
                );
                return Err(LedgerError::Conflict {
                    tx_hash: tx_hash.to_owned(),
                    count: many.len(),
                });
            }
        };

        let new_status = update.status;
        if self.store.update_by_id(target, update).await? == 0 {
            return Err(LedgerError::NotFound);
        }

        let settled = self
            .store
            .by_tx_hash_and_status(tx_hash, new_status)
            .await?
            .into_iter()
            .find(|record| record.id == target)
            .ok_or(LedgerError::NotFound)?;

        info!(
            id = %settled.id,
            tx_hash = %tx_hash,
            status = ?new_status,
            "Transaction settled"
        );
        Ok(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTransactionStore;
    use rust_decimal::Decimal;

    fn new_tx(tx_hash: &str, status: TransactionStatus) -> NewTransaction {
        NewTransaction {
            merchant_id: "merchant-1".to_string(),
            wallet: "0xabc".to_string(),
            amount: Decimal::new(1250, 2),
            currency: "USDC".to_string(),
            status,
            tx_hash: tx_hash.to_string(),
            recipient: None,
            order_id: None,
            kind: None,
            network: None,
        }
    }

    fn settle(status: TransactionStatus) -> TransactionUpdate {
        TransactionUpdate {
            status,
            recipient: Some("0xdef".to_string()),
            order_id: None,
            kind: Some("offramp".to_string()),
            network: None,
        }
    }

    fn ledger() -> (MemoryTransactionStore, TransactionLedger) {
        let store = MemoryTransactionStore::new();
        let ledger = TransactionLedger::new(Arc::new(store.clone()));
        (store, ledger)
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let (_, ledger) = ledger();
        let created = ledger
            .create(new_tx("0x01", TransactionStatus::Pending))
            .await
            .unwrap();

        assert_eq!(ledger.get(created.id).await.unwrap(), created);
        assert_eq!(ledger.get_by_tx_hash("0x01").await.unwrap(), created);
        assert!(matches!(
            ledger.get(Uuid::now_v7()).await,
            Err(LedgerError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_settle_single_pending() {
        let (_, ledger) = ledger();
        let created = ledger
            .create(new_tx("0x02", TransactionStatus::Pending))
            .await
            .unwrap();

        let settled = ledger
            .settle_pending("0x02", settle(TransactionStatus::Success))
            .await
            .unwrap();

        assert_eq!(settled.id, created.id);
        assert_eq!(settled.status, TransactionStatus::Success);
        assert_eq!(settled.recipient.as_deref(), Some("0xdef"));
        assert_eq!(settled.kind.as_deref(), Some("offramp"));
        assert_eq!(settled.amount, created.amount);
    }

    #[tokio::test]
    async fn test_settle_without_pending_is_not_found() {
        let (_, ledger) = ledger();
        ledger
            .create(new_tx("0x03", TransactionStatus::Success))
            .await
            .unwrap();

        let result = ledger
            .settle_pending("0x03", settle(TransactionStatus::Failed))
            .await;
        assert!(matches!(result, Err(LedgerError::NotFound)));
    }

    #[tokio::test]
    async fn test_settle_with_duplicate_pending_mutates_nothing() {
        let (store, ledger) = ledger();
        ledger
            .create(new_tx("0x04", TransactionStatus::Pending))
            .await
            .unwrap();
        ledger
            .create(new_tx("0x04", TransactionStatus::Pending))
            .await
            .unwrap();
        let before = store.snapshot().await;

        let result = ledger
            .settle_pending("0x04", settle(TransactionStatus::Success))
            .await;

        assert!(matches!(
            result,
            Err(LedgerError::Conflict { count: 2, .. })
        ));
        assert_eq!(store.snapshot().await, before);
    }
}
