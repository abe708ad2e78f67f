//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request requires a session but the session cookie is missing or
    /// malformed.
    #[error("Unauthorized.")]
    Unauthorized,

    /// The request body could not be parsed, e.g. a field is missing, has the
    /// wrong type or an enum field has an unknown value.
    ///
    /// Callers should pass in the message from the rejected extractor.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// An empty or whitespace-only string was used as a transaction title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// The amount of a new transaction was negative, NaN or infinite.
    ///
    /// The sign of a stored amount is derived from the transaction type, so
    /// clients must always send the magnitude.
    #[error("{0} is not a valid amount, expected a finite number that is zero or greater")]
    InvalidAmount(f64),

    /// Recording the transaction would push the session's balance past the
    /// largest representable amount.
    #[error("adding {0} would make the session balance overflow")]
    BalanceOverflow(f64),

    /// The transaction ID in the request path is not a UUID.
    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidTransactionId(String),

    /// The requested resource was not found.
    ///
    /// This is also returned for resources that exist but belong to another
    /// session so that a client cannot learn about other sessions' data.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client for any error.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

impl Error {
    /// The HTTP status code that best describes this error to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::InvalidRequestBody(_)
            | Error::EmptyTitle
            | Error::InvalidAmount(_)
            | Error::BalanceOverflow(_)
            | Error::InvalidTransactionId(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Error::NotFound => "Not found.".to_owned(),
            // Storage details stay in the server logs.
            Error::SqlError(_) | Error::DatabaseLockError => {
                tracing::error!("An unexpected error occurred: {}", self);
                "Internal server error.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
