//! Transaction persistence.
//!
//! [`TransactionStore`] is the seam between the ledger and the database.
//! [`PgTransactionStore`] is the production implementation; the in-memory
//! [`MemoryTransactionStore`] backs `--in-memory` mode and the tests.

mod memory;
mod postgres;

pub use memory::MemoryTransactionStore;
pub use postgres::PgTransactionStore;

use crate::entities::transaction::{
    NewTransaction, TransactionRecord, TransactionStatus, TransactionUpdate,
};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in a transaction store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row-level operations over the transactions table.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a new row and return it as stored.
    async fn insert(&self, transaction: NewTransaction) -> Result<TransactionRecord, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TransactionRecord>, StoreError>;

    /// The most recently created row with this tx hash.
    async fn latest_by_tx_hash(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionRecord>, StoreError>;

    /// Every row with this tx hash in the given status, newest first.
    async fn by_tx_hash_and_status(
        &self,
        tx_hash: &str,
        status: TransactionStatus,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Apply `update` to the row with this id. Returns the number of rows
    /// updated.
    async fn update_by_id(&self, id: Uuid, update: TransactionUpdate) -> Result<u64, StoreError>;
}
