//! Defines the core data models for transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, session::SessionId};

/// Alias for the type used for transaction IDs.
pub type TransactionId = Uuid;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money flowing into the account, stored as a positive amount.
    Credit,
    /// Money flowing out of the account, stored as a negative amount.
    Debit,
}

impl TransactionType {
    /// Apply the sign for this transaction type to `magnitude`.
    pub fn signed_amount(self, magnitude: f64) -> f64 {
        match self {
            TransactionType::Credit => magnitude,
            TransactionType::Debit => -magnitude,
        }
    }
}

/// An expense or income recorded by a session.
///
/// To create a new `Transaction`, use [Transaction::build] and pass the
/// result to a [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The signed amount of money, positive for credits and negative for debits.
    pub amount: f64,
    /// The session that created, and owns, the transaction.
    pub session_id: SessionId,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Validate the parts of a new transaction.
    ///
    /// Shortcut for [NewTransaction::new] for discoverability.
    ///
    /// # Errors
    /// Returns an [Error::EmptyTitle] or [Error::InvalidAmount], see [NewTransaction::new].
    pub fn build(
        title: &str,
        magnitude: f64,
        transaction_type: TransactionType,
        session_id: SessionId,
    ) -> Result<NewTransaction, Error> {
        NewTransaction::new(title, magnitude, transaction_type, session_id)
    }
}

/// A validated transaction that has not been stored yet.
///
/// The amount has already been signed according to the transaction type, so
/// stores never see the raw magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    title: String,
    amount: f64,
    session_id: SessionId,
}

impl NewTransaction {
    /// Create a new transaction for `session_id`.
    ///
    /// `magnitude` is the unsigned amount of money. Credits store it as is
    /// and debits store its negation.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyTitle] if `title` is empty or only whitespace,
    /// - or [Error::InvalidAmount] if `magnitude` is negative, NaN or infinite.
    pub fn new(
        title: &str,
        magnitude: f64,
        transaction_type: TransactionType,
        session_id: SessionId,
    ) -> Result<Self, Error> {
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(Error::InvalidAmount(magnitude));
        }

        Ok(Self {
            title: title.to_owned(),
            amount: transaction_type.signed_amount(magnitude),
            session_id,
        })
    }

    /// The signed amount that will be stored.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The session that will own the transaction.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Assign an ID and creation time, producing the record to persist.
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            title: self.title,
            amount: self.amount,
            session_id: self.session_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// The length of a UUID in its hyphenated form, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
const HYPHENATED_UUID_LENGTH: usize = 36;

/// Parse a transaction ID taken from a request path.
///
/// Only the hyphenated form is accepted, the simple, braced and URN forms are not.
///
/// # Errors
/// Returns an [Error::InvalidTransactionId] if `raw_id` is not a hyphenated UUID.
pub fn parse_transaction_id(raw_id: &str) -> Result<TransactionId, Error> {
    if raw_id.len() != HYPHENATED_UUID_LENGTH {
        return Err(Error::InvalidTransactionId(raw_id.to_owned()));
    }

    Uuid::parse_str(raw_id).map_err(|_| Error::InvalidTransactionId(raw_id.to_owned()))
}

/// The aggregate balance of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all transaction amounts, zero if there are no transactions.
    pub amount: f64,
}
