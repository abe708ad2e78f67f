//! Defines the endpoint for a session's balance.
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error, app_state::TransactionState, session::SessionId, stores::TransactionStore,
    transaction::Summary,
};

/// The JSON body for a session's summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The sum of the session's transactions.
    pub summary: Summary,
}

/// A route handler for the sum of all transaction amounts in the caller's session.
///
/// **Note**: Must be behind [session_guard](crate::session::session_guard).
pub async fn get_summary_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error>
where
    T: TransactionStore + Send + Sync,
{
    let summary = state.transaction_store.summary(&session_id)?;

    Ok(Json(SummaryResponse { summary }))
}
