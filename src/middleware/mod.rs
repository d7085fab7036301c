pub mod auth;

pub use auth::{BasicCredentials, RequireBasicAuth};
