//! Book inventory page controller

use crate::api::PerpusClient;
use crate::error::ClientResult;
use crate::models::{Book, BookFilter, BookStatus, BorrowReceipt, ReturnReceipt};

/// Drives the book inventory view: holds the fetched list and applies the
/// optimistic status flip after borrow/return calls.
///
/// The flip is provisional. Every successful write is followed by a
/// [`reload`](Self::reload), either via the `*_and_reload` flows or by the
/// caller, and the reloaded list always wins, even when it disagrees with
/// the optimistic guess.
pub struct BooksController {
    client: PerpusClient,
    books: Vec<Book>,
}

impl BooksController {
    pub fn new(client: PerpusClient) -> Self {
        Self {
            client,
            books: Vec::new(),
        }
    }

    /// Current view state.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Fetch the authoritative list from the server, replacing local state.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.books = self.client.list_books(&BookFilter::default()).await?;
        Ok(())
    }

    /// Borrow a book and optimistically mark it `borrowed` locally.
    pub async fn borrow(
        &mut self,
        book_id: i64,
        member_id: i64,
        due_days: Option<i64>,
    ) -> ClientResult<BorrowReceipt> {
        let receipt = self.client.borrow_book(book_id, member_id, due_days).await?;
        self.flip_status(book_id, BookStatus::Borrowed);
        Ok(receipt)
    }

    /// Return a book and optimistically mark it `available` locally.
    pub async fn return_book(
        &mut self,
        book_id: i64,
        member_id: i64,
    ) -> ClientResult<ReturnReceipt> {
        let receipt = self.client.return_book(book_id, member_id).await?;
        self.flip_status(book_id, BookStatus::Available);
        Ok(receipt)
    }

    /// Full borrow flow: optimistic flip, then immediate reconciliation from
    /// the server. Use [`borrow`](Self::borrow) + [`reload`](Self::reload)
    /// separately only when the view needs to render between the two steps.
    pub async fn borrow_and_reload(
        &mut self,
        book_id: i64,
        member_id: i64,
        due_days: Option<i64>,
    ) -> ClientResult<BorrowReceipt> {
        let receipt = self.borrow(book_id, member_id, due_days).await?;
        self.reload().await?;
        Ok(receipt)
    }

    /// Full return flow: optimistic flip, then immediate reconciliation.
    pub async fn return_and_reload(
        &mut self,
        book_id: i64,
        member_id: i64,
    ) -> ClientResult<ReturnReceipt> {
        let receipt = self.return_book(book_id, member_id).await?;
        self.reload().await?;
        Ok(receipt)
    }

    fn flip_status(&mut self, book_id: i64, status: BookStatus) {
        if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
            book.status = status;
        }
    }
}
