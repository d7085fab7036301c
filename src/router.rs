use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{delete, get, post, put},
};

use crate::handlers::livros::{add_book, delete_book, list_books, update_book};
use crate::middleware::auth::BasicCredentials;
use crate::service::store::SharedStore;

#[derive(Clone)]
pub struct CatalogState {
    pub store: SharedStore,
    pub credentials: Arc<BasicCredentials>,
}

impl CatalogState {
    pub fn new(store: SharedStore, credentials: BasicCredentials) -> Self {
        Self {
            store,
            credentials: Arc::new(credentials),
        }
    }
}

impl FromRef<CatalogState> for Arc<BasicCredentials> {
    fn from_ref(state: &CatalogState) -> Self {
        state.credentials.clone()
    }
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/livros", get(list_books))
        .route("/adiciona", post(add_book))
        .route("/atualiza/{id_livro}", put(update_book))
        .route("/deletar/{id_livro}", delete(delete_book))
        .with_state(state)
}
