//! Data models exchanged with the Perpus API

pub mod auth;
pub mod book;
pub mod member;
pub mod transaction;

// Re-export commonly used types
pub use auth::{AuthUser, HealthStatus, Token};
pub use book::{Book, BookFilter, BookStatus, NewBookRequest};
pub use member::{
    Member, MemberFilter, MemberStats, MemberStatus, MembershipType, NewMemberRequest,
    UpdateMemberRequest,
};
pub use transaction::{
    ActiveBorrow, BorrowReceipt, ReturnReceipt, Transaction, TransactionFilter, TransactionType,
};

/// Query-parameter helper: omitted or blank optional filters are not sent at
/// all, never as empty strings.
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
