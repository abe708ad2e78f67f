//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - Route handlers for creating, listing, getting and summing transactions

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod summary_endpoint;

pub use self::core::{
    NewTransaction, Summary, Transaction, TransactionId, TransactionType, parse_transaction_id,
};
pub use create_endpoint::{CreateTransactionBody, create_transaction_endpoint};
pub use get_endpoint::{TransactionResponse, get_transaction_endpoint};
pub use list_endpoint::{TransactionsResponse, list_transactions_endpoint};
pub use summary_endpoint::{SummaryResponse, get_summary_endpoint};
