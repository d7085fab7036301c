//! Request and response shapes shared by the handlers and the stores.

pub mod book;
pub mod page;

pub use book::{Book, BookPayload};
pub use page::{ListResponse, Page, PageQuery, PageWindow};
