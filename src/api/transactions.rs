//! Borrow/return transaction operations

use reqwest::Method;

use super::PerpusClient;
use crate::error::ClientResult;
use crate::models::transaction::{BorrowRequest, ReturnRequest};
use crate::models::{ActiveBorrow, BorrowReceipt, ReturnReceipt, Transaction, TransactionFilter};

/// Loan period applied when the caller does not specify one
pub const DEFAULT_DUE_DAYS: i64 = 14;

impl PerpusClient {
    /// Borrow a book for a member. The book's status transition happens
    /// server-side; the receipt's `due_date` is for display only.
    pub async fn borrow_book(
        &self,
        book_id: i64,
        member_id: i64,
        due_days: Option<i64>,
    ) -> ClientResult<BorrowReceipt> {
        let body = BorrowRequest {
            book_id,
            member_id,
            due_days: due_days.unwrap_or(DEFAULT_DUE_DAYS),
        };
        let request = self
            .request(Method::POST, "/api/transactions/borrow")
            .json(&body);
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Return a borrowed book.
    pub async fn return_book(&self, book_id: i64, member_id: i64) -> ClientResult<ReturnReceipt> {
        let body = ReturnRequest { book_id, member_id };
        let request = self
            .request(Method::POST, "/api/transactions/return")
            .json(&body);
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// List transactions, optionally narrowed to a book and/or member.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> ClientResult<Vec<Transaction>> {
        let request = self
            .request(Method::GET, "/api/transactions")
            .query(&filter.query());
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// List open loans with joined book/member display data.
    pub async fn active_borrows(&self) -> ClientResult<Vec<ActiveBorrow>> {
        let request = self.request(Method::GET, "/api/transactions/active-borrows");
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }
}
