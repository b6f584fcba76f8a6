//! Borrow/return transaction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Borrow,
    Return,
}

/// A ledger entry as returned by `/api/transactions`
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowRequest {
    pub book_id: i64,
    pub member_id: i64,
    pub due_days: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnRequest {
    pub book_id: i64,
    pub member_id: i64,
}

/// Response of a successful borrow; `due_date` is display-only
#[derive(Debug, Clone, Deserialize)]
pub struct BorrowReceipt {
    pub message: String,
    pub transaction_id: i64,
    pub due_date: DateTime<Utc>,
}

/// Response of a successful return; `is_late` is display-only
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnReceipt {
    pub message: String,
    pub transaction_id: i64,
    pub is_late: bool,
    pub return_date: DateTime<Utc>,
}

/// An open loan from `/api/transactions/active-borrows`
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveBorrow {
    pub transaction_id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub member_id: i64,
    pub member_name: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

/// Optional filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub book_id: Option<i64>,
    pub member_id: Option<i64>,
}

impl TransactionFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(book_id) = self.book_id {
            params.push(("book_id", book_id.to_string()));
        }
        if let Some(member_id) = self.member_id {
            params.push(("member_id", member_id.to_string()));
        }
        params
    }
}
