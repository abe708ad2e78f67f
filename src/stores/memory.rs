//! Implements an in-memory transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error,
    session::SessionId,
    stores::TransactionStore,
    transaction::{NewTransaction, Summary, Transaction, TransactionId},
};

/// Stores transactions in memory in the order they were created.
///
/// Clones share the same transactions. Nothing is persisted when the process
/// exits, so this store is mostly useful for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Transaction>>, Error> {
        self.transactions
            .lock()
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = transaction.finalize();
        let mut transactions = self.lock()?;

        let balance = session_balance(&transactions, &transaction.session_id);
        if !(balance + transaction.amount).is_finite() {
            return Err(Error::BalanceOverflow(transaction.amount));
        }

        transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn get(&self, session_id: &SessionId, id: TransactionId) -> Result<Transaction, Error> {
        self.lock()?
            .iter()
            .find(|transaction| transaction.id == id && &transaction.session_id == session_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn list(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .lock()?
            .iter()
            .filter(|transaction| &transaction.session_id == session_id)
            .cloned()
            .collect())
    }

    fn summary(&self, session_id: &SessionId) -> Result<Summary, Error> {
        let amount = session_balance(&self.lock()?, session_id);

        Ok(Summary { amount })
    }
}

fn session_balance(transactions: &[Transaction], session_id: &SessionId) -> f64 {
    transactions
        .iter()
        .filter(|transaction| &transaction.session_id == session_id)
        .fold(0.0, |total, transaction| total + transaction.amount)
}
