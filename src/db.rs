//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::stores::sqlite::create_transaction_table;

/// Create the tables and indexes for the domain models if they do not exist.
///
/// All statements run inside a single SQL transaction, so a failure leaves the
/// database untouched.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;

    transaction.commit()
}
