//! Defines the endpoint for creating a new transaction.
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    Error,
    app_state::CreateTransactionState,
    session::resolve_or_create_session,
    stores::TransactionStore,
    transaction::{Transaction, TransactionType},
};

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionBody {
    /// Text detailing the transaction.
    pub title: String,
    /// The unsigned amount of money, the sign is taken from `transaction_type`.
    ///
    /// Clients send this as `amaunt`, `amount` is accepted too.
    #[serde(rename = "amaunt", alias = "amount")]
    pub magnitude: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// A route handler for creating a new transaction, responds with 201 Created
/// and no body on success.
///
/// Requests without a session cookie start a new session: the response sets
/// the session cookie and the transaction is recorded under the new session.
/// Invalid requests neither store anything nor issue a cookie.
pub async fn create_transaction_endpoint<T>(
    State(state): State<CreateTransactionState<T>>,
    jar: CookieJar,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Result<(StatusCode, CookieJar), Error>
where
    T: TransactionStore + Send + Sync,
{
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("rejected transaction body: {rejection}");
        Error::InvalidRequestBody(rejection.body_text())
    })?;

    let (jar, session_id) = resolve_or_create_session(jar, state.session_cookie_duration);

    let transaction = Transaction::build(
        &body.title,
        body.magnitude,
        body.transaction_type,
        session_id,
    )?;

    if let Err(error) = state.transaction_store.create(transaction) {
        tracing::error!("could not create transaction: {error}");
        return Err(error);
    }

    Ok((StatusCode::CREATED, jar))
}
