use super::{StoreError, TransactionStore};
use crate::entities::transaction::{
    NewTransaction, TransactionRecord, TransactionStatus, TransactionUpdate,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local transaction store. Rows are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    rows: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn snapshot(&self) -> Vec<TransactionRecord> {
        self.rows.read().await.clone()
    }
}

fn now() -> time::PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, transaction: NewTransaction) -> Result<TransactionRecord, StoreError> {
        let created_at = now();
        let record = TransactionRecord {
            id: Uuid::now_v7(),
            merchant_id: transaction.merchant_id,
            wallet: transaction.wallet,
            amount: transaction.amount,
            currency: transaction.currency,
            status: transaction.status,
            tx_hash: transaction.tx_hash,
            recipient: transaction.recipient,
            order_id: transaction.order_id,
            kind: transaction.kind,
            network: transaction.network,
            created_at,
            updated_at: created_at,
        };
        self.rows.write().await.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TransactionRecord>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn latest_by_tx_hash(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().rev().find(|r| r.tx_hash == tx_hash).cloned())
    }

    async fn by_tx_hash_and_status(
        &self,
        tx_hash: &str,
        status: TransactionStatus,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.tx_hash == tx_hash && r.status == status)
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: Uuid, update: TransactionUpdate) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(0);
        };
        row.status = update.status;
        if update.recipient.is_some() {
            row.recipient = update.recipient;
        }
        if update.order_id.is_some() {
            row.order_id = update.order_id;
        }
        if update.kind.is_some() {
            row.kind = update.kind;
        }
        if update.network.is_some() {
            row.network = update.network;
        }
        row.updated_at = now();
        Ok(1)
    }
}
