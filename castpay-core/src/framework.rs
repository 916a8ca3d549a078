use sqlx::PgPool;

/// Executes database commands against a connection pool.
///
/// Every query in this crate is a command struct with a
/// `kanau::processor::Processor` implementation on this type.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
