//! Defines the endpoint for listing a session's transactions.
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error, app_state::TransactionState, session::SessionId, stores::TransactionStore,
    transaction::Transaction,
};

/// The JSON body of the list of transactions.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The session's transactions in the order they were created.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction in the caller's session.
///
/// A session without transactions gets an empty list.
///
/// **Note**: Must be behind [session_guard](crate::session::session_guard).
pub async fn list_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionsResponse>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let transactions = state.transaction_store.list(&session_id)?;

    Ok(Json(TransactionsResponse { transactions }))
}
