//! Defines the endpoint for getting a single transaction.
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::TransactionState,
    session::SessionId,
    stores::TransactionStore,
    transaction::{Transaction, parse_transaction_id},
};

/// The JSON body for a single transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// The transaction, `null` if the session has no transaction with the requested ID.
    pub transaction: Option<Transaction>,
}

/// A route handler for getting a transaction by its ID.
///
/// Responds with 404 Not Found and `{"transaction": null}` if the caller's
/// session has no transaction with that ID, including when the ID belongs to
/// another session, so that clients cannot probe other sessions' data.
/// Responds with 400 Bad Request if the ID is not a UUID.
///
/// **Note**: Must be behind [session_guard](crate::session::session_guard).
pub async fn get_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Extension(session_id): Extension<SessionId>,
    Path(raw_transaction_id): Path<String>,
) -> Response
where
    T: TransactionStore + Send + Sync,
{
    let transaction_id = match parse_transaction_id(&raw_transaction_id) {
        Ok(transaction_id) => transaction_id,
        Err(error) => return error.into_response(),
    };

    match state.transaction_store.get(&session_id, transaction_id) {
        Ok(transaction) => Json(TransactionResponse {
            transaction: Some(transaction),
        })
        .into_response(),
        Err(Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(TransactionResponse { transaction: None }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not get transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
