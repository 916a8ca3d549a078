use crate::framework::DatabaseProcessor;
use castpay_sdk::objects::transactions::{
    TransactionResponse, TransactionStatus as SdkTransactionStatus,
};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Transaction status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `castpay_sdk::objects::transactions::TransactionStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE", type_name = "transaction_status")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl From<TransactionStatus> for SdkTransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Pending => SdkTransactionStatus::Pending,
            TransactionStatus::Success => SdkTransactionStatus::Success,
            TransactionStatus::Failed => SdkTransactionStatus::Failed,
            TransactionStatus::Cancelled => SdkTransactionStatus::Cancelled,
        }
    }
}

impl From<SdkTransactionStatus> for TransactionStatus {
    fn from(value: SdkTransactionStatus) -> Self {
        match value {
            SdkTransactionStatus::Pending => TransactionStatus::Pending,
            SdkTransactionStatus::Success => TransactionStatus::Success,
            SdkTransactionStatus::Failed => TransactionStatus::Failed,
            SdkTransactionStatus::Cancelled => TransactionStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub merchant_id: String,
    pub wallet: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub tx_hash: String,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    pub kind: Option<String>,
    pub network: Option<String>,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

impl TransactionRecord {
    pub fn to_response(&self) -> TransactionResponse {
        TransactionResponse {
            id: self.id,
            merchant_id: self.merchant_id.clone(),
            wallet: self.wallet.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            status: self.status.into(),
            tx_hash: self.tx_hash.clone(),
            recipient: self.recipient.clone(),
            order_id: self.order_id.clone(),
            kind: self.kind.clone(),
            network: self.network.clone(),
            created_at: self.created_at.assume_utc(),
            updated_at: self.updated_at.assume_utc(),
        }
    }
}

/// Data for inserting a new transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub merchant_id: String,
    pub wallet: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub tx_hash: String,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    pub kind: Option<String>,
    pub network: Option<String>,
}

/// Mutable fields written when a pending transaction settles.
///
/// `status` is always written; the optional fields only overwrite the
/// stored value when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub status: TransactionStatus,
    pub recipient: Option<String>,
    pub order_id: Option<String>,
    pub kind: Option<String>,
    pub network: Option<String>,
}

const RETURNING_COLUMNS: &str = "id, merchant_id, wallet, amount, currency, status, tx_hash, \
     recipient, order_id, kind, network, created_at, updated_at";

#[derive(Debug, Clone)]
/// Insert a new transaction row.
pub struct InsertTransaction {
    pub id: Uuid,
    pub transaction: NewTransaction,
}

impl Processor<InsertTransaction> for DatabaseProcessor {
    type Output = TransactionRecord;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertTransaction")]
    async fn process(&self, insert: InsertTransaction) -> Result<TransactionRecord, sqlx::Error> {
        let InsertTransaction { id, transaction } = insert;
        let sql = format!(
            "INSERT INTO transactions \
             (id, merchant_id, wallet, amount, currency, status, tx_hash, recipient, order_id, kind, network) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {RETURNING_COLUMNS}"
        );
        sqlx::query_as::<_, TransactionRecord>(&sql)
            .bind(id)
            .bind(transaction.merchant_id)
            .bind(transaction.wallet)
            .bind(transaction.amount)
            .bind(transaction.currency)
            .bind(transaction.status)
            .bind(transaction.tx_hash)
            .bind(transaction.recipient)
            .bind(transaction.order_id)
            .bind(transaction.kind)
            .bind(transaction.network)
            .fetch_one(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct GetTransactionById {
    pub id: Uuid,
}

impl Processor<GetTransactionById> for DatabaseProcessor {
    type Output = Option<TransactionRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetTransactionById")]
    async fn process(
        &self,
        query: GetTransactionById,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        let sql = format!("SELECT {RETURNING_COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, TransactionRecord>(&sql)
            .bind(query.id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
/// Get the most recently created transaction carrying a tx hash.
pub struct GetLatestTransactionByHash {
    pub tx_hash: String,
}

impl Processor<GetLatestTransactionByHash> for DatabaseProcessor {
    type Output = Option<TransactionRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetLatestTransactionByHash")]
    async fn process(
        &self,
        query: GetLatestTransactionByHash,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RETURNING_COLUMNS} FROM transactions \
             WHERE tx_hash = $1 ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, TransactionRecord>(&sql)
            .bind(query.tx_hash)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
/// Get transactions carrying a tx hash in a given status.
pub struct GetTransactionsByHashAndStatus {
    pub tx_hash: String,
    pub status: TransactionStatus,
}

impl Processor<GetTransactionsByHashAndStatus> for DatabaseProcessor {
    type Output = Vec<TransactionRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetTransactionsByHashAndStatus")]
    async fn process(
        &self,
        query: GetTransactionsByHashAndStatus,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RETURNING_COLUMNS} FROM transactions \
             WHERE tx_hash = $1 AND status = $2 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TransactionRecord>(&sql)
            .bind(query.tx_hash)
            .bind(query.status)
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
/// Overwrite the mutable fields of one transaction.
///
/// Returns the number of rows updated.
pub struct UpdateTransactionById {
    pub id: Uuid,
    pub update: TransactionUpdate,
}

impl Processor<UpdateTransactionById> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateTransactionById")]
    async fn process(&self, cmd: UpdateTransactionById) -> Result<u64, sqlx::Error> {
        let UpdateTransactionById { id, update } = cmd;
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET status = $2,
                recipient = COALESCE($3, recipient),
                order_id = COALESCE($4, order_id),
                kind = COALESCE($5, kind),
                network = COALESCE($6, network),
                updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.recipient)
        .bind(update.order_id)
        .bind(update.kind)
        .bind(update.network)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
