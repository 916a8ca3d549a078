use super::{StoreError, TransactionStore};
use crate::entities::transaction::{
    GetLatestTransactionByHash, GetTransactionById, GetTransactionsByHashAndStatus,
    InsertTransaction, NewTransaction, TransactionRecord, TransactionStatus, TransactionUpdate,
    UpdateTransactionById,
};
use crate::framework::DatabaseProcessor;
use async_trait::async_trait;
use kanau::processor::Processor;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed transaction store.
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    processor: DatabaseProcessor,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            processor: DatabaseProcessor { pool },
        }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, transaction: NewTransaction) -> Result<TransactionRecord, StoreError> {
        let record = self
            .processor
            .process(InsertTransaction {
                id: Uuid::now_v7(),
                transaction,
            })
            .await?;
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TransactionRecord>, StoreError> {
        let record = self.processor.process(GetTransactionById { id }).await?;
        Ok(record)
    }

    async fn latest_by_tx_hash(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let record = self
            .processor
            .process(GetLatestTransactionByHash {
                tx_hash: tx_hash.to_owned(),
            })
            .await?;
        Ok(record)
    }

    async fn by_tx_hash_and_status(
        &self,
        tx_hash: &str,
        status: TransactionStatus,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let records = self
            .processor
            .process(GetTransactionsByHashAndStatus {
                tx_hash: tx_hash.to_owned(),
                status,
            })
            .await?;
        Ok(records)
    }

    async fn update_by_id(&self, id: Uuid, update: TransactionUpdate) -> Result<u64, StoreError> {
        let updated = self
            .processor
            .process(UpdateTransactionById { id, update })
            .await?;
        Ok(updated)
    }
}
