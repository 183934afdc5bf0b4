use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Upper bound for acquiring a connection and for any single statement.
pub const DB_TIMEOUT: Duration = Duration::from_secs(3);

/// Applies `statement_timeout` to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "SET statement_timeout = {}",
            self.0.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .connection_timeout(DB_TIMEOUT)
        .connection_customizer(Box::new(StatementTimeout(DB_TIMEOUT)))
        .build(manager)
}
