//! Book inventory operations

use reqwest::Method;
use validator::Validate;

use super::PerpusClient;
use crate::error::ClientResult;
use crate::models::{Book, BookFilter, NewBookRequest};

impl PerpusClient {
    /// List books, optionally filtered by category, status or search term.
    /// Omitted filters are not sent as query parameters at all.
    pub async fn list_books(&self, filter: &BookFilter) -> ClientResult<Vec<Book>> {
        let request = self
            .request(Method::GET, "/api/books")
            .query(&filter.query());
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Create a book. Fields are validated client-side before any request is
    /// sent; the caller is responsible for the follow-up list reload.
    pub async fn create_book(&self, book: &NewBookRequest) -> ClientResult<Book> {
        book.validate()?;
        let request = self.request(Method::POST, "/api/books").json(book);
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }
}
