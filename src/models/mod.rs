//! Data models for Stacks

pub mod author;
pub mod book;
pub mod genre;
pub mod loan;
pub mod member;
pub mod pagination;
pub mod report;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use genre::Genre;
pub use loan::LoanDetails;
pub use member::Member;
pub use pagination::Pagination;
