pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Open a connection pool for the given DSN.
///
/// In-memory sqlite is pinned to a single pooled connection: every pooled
/// connection would otherwise get its own empty database.
pub async fn connect(dsn: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    if dsn.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    }
    Database::connect(opts).await
}
