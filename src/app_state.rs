//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;
use time::Duration;

use crate::{session::DEFAULT_SESSION_COOKIE_DURATION, stores::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for the sessions' [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// How long a newly issued session cookie is kept by the client.
    pub session_cookie_duration: Duration,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState] that issues session cookies lasting
    /// [DEFAULT_SESSION_COOKIE_DURATION].
    pub fn new(transaction_store: T) -> Self {
        Self {
            transaction_store,
            session_cookie_duration: DEFAULT_SESSION_COOKIE_DURATION,
        }
    }
}

/// The state needed to read a session's transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for the sessions' [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> FromRef<AppState<T>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed to create a transaction, and possibly a session.
#[derive(Debug, Clone)]
pub struct CreateTransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for the sessions' [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// How long a newly issued session cookie is kept by the client.
    pub session_cookie_duration: Duration,
}

impl<T> FromRef<AppState<T>> for CreateTransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            session_cookie_duration: state.session_cookie_duration,
        }
    }
}
