//! Defines the transaction store trait.

use crate::{
    Error,
    session::SessionId,
    transaction::{NewTransaction, Summary, Transaction, TransactionId},
};

/// Handles the creation and retrieval of transactions.
///
/// Every read is scoped to a session: implementers must never return, or
/// include in a summary, a transaction owned by a different session.
pub trait TransactionStore {
    /// Assign an ID to `transaction` and persist it.
    ///
    /// Returns [Error::BalanceOverflow] instead of storing a transaction that
    /// would make the session's balance infinite.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve the transaction `id` owned by `session_id`.
    ///
    /// Returns [Error::NotFound] both when `id` does not exist and when it
    /// belongs to another session.
    fn get(&self, session_id: &SessionId, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve all transactions owned by `session_id` in the order they were created.
    fn list(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error>;

    /// Sum the amounts of all transactions owned by `session_id`.
    fn summary(&self, session_id: &SessionId) -> Result<Summary, Error>;
}
