//! PostgreSQL connectivity and schema metadata.
//!
//! Low-level database access shared by the guidepost crates.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from `DB_URL`
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`migrate()`] — Runs `CREATE TABLE` / `CREATE INDEX` for a table
//!
//! ## Table Names
//!
//! Constants for the persistent entities: users and guides.

use std::sync::Arc;
use tokio_postgres::Client;

/// Schema metadata for PostgreSQL tables.
///
/// Describes table structure only; no I/O. DDL strings are assembled at
/// compile time via [`const_format::concatcp!`] in the implementing crates.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

/// Establishes a database connection.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
///
/// # Panics
///
/// Panics if `DB_URL` is not set or if connection fails.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}

/// Creates the table and indices for a [`Schema`] if they do not exist.
pub async fn migrate<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::info!("migrating table {}", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await?;
    Ok(())
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:  &str = "users";
/// Table for authored guide documents.
#[rustfmt::skip]
pub const GUIDES: &str = "guides";
