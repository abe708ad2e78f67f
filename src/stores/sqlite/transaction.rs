//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    session::SessionId,
    stores::TransactionStore,
    transaction::{NewTransaction, Summary, Transaction, TransactionId},
};

/// Stores transactions in a SQLite database.
///
/// The transaction table must be created with [create_transaction_table]
/// (or [initialize](crate::initialize_db)) before the store is used.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert a new transaction into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::BalanceOverflow] if the session's balance would no longer be finite,
    /// - [Error::SqlError] if there is an SQL error,
    /// - or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = transaction.finalize();
        let connection = self.lock()?;

        // The lock is held until the insert, so no other create can slip in between.
        let balance = session_balance(&connection, &transaction.session_id)?;
        if !(balance + transaction.amount).is_finite() {
            return Err(Error::BalanceOverflow(transaction.amount));
        }

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (id, title, amount, session_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, title, amount, session_id, created_at",
            )?
            .query_row(
                (
                    transaction.id,
                    &transaction.title,
                    transaction.amount,
                    transaction.session_id.as_str(),
                    transaction.created_at,
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id` and owning session.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by `session_id`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, session_id: &SessionId, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, title, amount, session_id, created_at FROM \"transaction\"
                 WHERE id = :id AND session_id = :session_id",
            )?
            .query_row(
                rusqlite::named_params! {
                    ":id": id,
                    ":session_id": session_id.as_str(),
                },
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Get the transactions owned by `session_id` in insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, amount, session_id, created_at FROM \"transaction\"
                 WHERE session_id = :session_id
                 ORDER BY rowid ASC",
            )?
            .query_map(&[(":session_id", session_id.as_str())], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Sum the amounts of the transactions owned by `session_id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn summary(&self, session_id: &SessionId) -> Result<Summary, Error> {
        let amount = session_balance(&*self.lock()?, session_id)?;

        Ok(Summary { amount })
    }
}

fn session_balance(connection: &Connection, session_id: &SessionId) -> Result<f64, rusqlite::Error> {
    connection.query_row(
        "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE session_id = ?1",
        [session_id.as_str()],
        |row| row.get(0),
    )
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id BLOB PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Every read filters on the session.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_session_id ON \"transaction\"(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let raw_session_id: String = row.get(3)?;
    let created_at = row.get(4)?;

    let session_id = SessionId::parse(&raw_session_id).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("invalid session ID {raw_session_id:?}").into(),
        )
    })?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id,
        created_at,
    })
}
