//! Page controllers: the consumption layer over the domain operations.
//!
//! Each controller owns the transient view state for one page and drives the
//! optimistic-update/reload pattern: writes flip local state immediately as a
//! hint, and a follow-up reload from the server is the single source of truth.

pub mod books;
pub mod login;
pub mod members;

pub use books::BooksController;
pub use login::LoginController;
pub use members::MembersController;
