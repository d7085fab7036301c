pub mod catalog_actor;
pub mod store;

pub use catalog_actor::MemoryCatalog;
pub use store::{BookStore, SharedStore};
