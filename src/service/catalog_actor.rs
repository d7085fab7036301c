use std::collections::BTreeMap;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::service::store::BookStore;
use crate::types::{Book, BookPayload, Page, PageWindow};

/// Messages handled by the catalog actor.
#[derive(Debug)]
pub enum CatalogMessage {
    Get(i64, RpcReplyPort<Option<Book>>),
    List(PageWindow, RpcReplyPort<Page>),
    Insert(Book, RpcReplyPort<Result<Book, CatalogError>>),
    Update(i64, BookPayload, RpcReplyPort<Option<Book>>),
    Delete(i64, RpcReplyPort<Option<Book>>),
}

/// Handle to the in-memory catalog. Every operation goes through the
/// actor's mailbox, so concurrent requests never touch the map at once.
#[derive(Clone)]
pub struct MemoryCatalog {
    actor: ActorRef<CatalogMessage>,
}

struct CatalogActor;

#[ractor::async_trait]
impl Actor for CatalogActor {
    type Msg = CatalogMessage;
    type State = BTreeMap<i64, Book>;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("CatalogActor started with an empty in-memory catalog");
        Ok(BTreeMap::new())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        books: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            CatalogMessage::Get(id, rp) => {
                let _ = rp.send(books.get(&id).cloned());
            }
            CatalogMessage::List(window, rp) => {
                let range = window.range(books.len());
                let page = Page {
                    total: books.len() as i64,
                    books: books
                        .values()
                        .skip(range.start)
                        .take(range.len())
                        .cloned()
                        .collect(),
                };
                let _ = rp.send(page);
            }
            CatalogMessage::Insert(book, rp) => {
                let res = if books.contains_key(&book.id_livro) {
                    debug!("ID: {}, insert rejected; id already present", book.id_livro);
                    Err(CatalogError::Conflict)
                } else {
                    books.insert(book.id_livro, book.clone());
                    Ok(book)
                };
                let _ = rp.send(res);
            }
            CatalogMessage::Update(id, payload, rp) => {
                let updated = books.get_mut(&id).map(|book| {
                    *book = payload.into_book(id);
                    book.clone()
                });
                let _ = rp.send(updated);
            }
            CatalogMessage::Delete(id, rp) => {
                let _ = rp.send(books.remove(&id));
            }
        }
        Ok(())
    }
}

impl MemoryCatalog {
    /// Spawn an unnamed catalog actor and return its handle.
    pub async fn spawn() -> Result<Self, CatalogError> {
        let (actor, _jh) = Actor::spawn(None, CatalogActor, ())
            .await
            .map_err(|e| CatalogError::RactorError(format!("spawn CatalogActor failed: {e}")))?;
        Ok(Self { actor })
    }
}

fn rpc_error(op: &str, e: impl std::fmt::Display) -> CatalogError {
    CatalogError::RactorError(format!("{op} RPC failed: {e}"))
}

#[async_trait]
impl BookStore for MemoryCatalog {
    async fn get(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        ractor::call!(self.actor, CatalogMessage::Get, id).map_err(|e| rpc_error("Get", e))
    }

    async fn list(&self, window: PageWindow) -> Result<Page, CatalogError> {
        ractor::call!(self.actor, CatalogMessage::List, window).map_err(|e| rpc_error("List", e))
    }

    async fn insert(&self, id: Option<i64>, payload: BookPayload) -> Result<Book, CatalogError> {
        let Some(id) = id else {
            return Err(CatalogError::BadRequest(
                "id_livro é obrigatório".to_string(),
            ));
        };
        let book = payload.into_book(id);
        ractor::call!(self.actor, CatalogMessage::Insert, book)
            .map_err(|e| rpc_error("Insert", e))?
    }

    async fn update(&self, id: i64, payload: BookPayload) -> Result<Option<Book>, CatalogError> {
        ractor::call!(self.actor, CatalogMessage::Update, id, payload)
            .map_err(|e| rpc_error("Update", e))
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        ractor::call!(self.actor, CatalogMessage::Delete, id).map_err(|e| rpc_error("Delete", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, author: &str, year: i32) -> BookPayload {
        BookPayload {
            titulo_livro: title.to_string(),
            autor_livro: author.to_string(),
            ano_livro: year,
        }
    }

    #[tokio::test]
    async fn insert_rejects_existing_id_and_keeps_original() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        store
            .insert(Some(1), payload("Dom Casmurro", "Machado de Assis", 1899))
            .await
            .expect("first insert");

        let res = store
            .insert(Some(1), payload("Iracema", "José de Alencar", 1865))
            .await;
        assert!(matches!(res, Err(CatalogError::Conflict)));

        let kept = store.get(1).await.expect("get").expect("present");
        assert_eq!(kept.titulo_livro, "Dom Casmurro");
    }

    #[tokio::test]
    async fn same_title_and_author_allowed_under_distinct_ids() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        store
            .insert(Some(1), payload("Dom Casmurro", "Machado de Assis", 1899))
            .await
            .expect("first insert");
        store
            .insert(Some(2), payload("Dom Casmurro", "Machado de Assis", 1899))
            .await
            .expect("id-based policy ignores title and author");
        let page = store.list(PageWindow { page: 1, limit: 10 }).await.expect("list");
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn insert_without_id_is_bad_request() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        let res = store.insert(None, payload("Iracema", "José de Alencar", 1865)).await;
        assert!(matches!(res, Err(CatalogError::BadRequest(_))));
    }

    #[tokio::test]
    async fn list_is_sorted_and_windowed() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        for id in [5, 3, 9, 1, 7] {
            store
                .insert(Some(id), payload(&format!("Livro {id}"), "Autor", 2000))
                .await
                .expect("insert");
        }

        let first = store.list(PageWindow { page: 1, limit: 2 }).await.expect("list");
        assert_eq!(first.total, 5);
        let ids: Vec<i64> = first.books.iter().map(|b| b.id_livro).collect();
        assert_eq!(ids, vec![1, 3]);

        let last = store.list(PageWindow { page: 3, limit: 2 }).await.expect("list");
        let ids: Vec<i64> = last.books.iter().map(|b| b.id_livro).collect();
        assert_eq!(ids, vec![9]);

        let past_end = store.list(PageWindow { page: 4, limit: 2 }).await.expect("list");
        assert!(past_end.books.is_empty());
        assert_eq!(past_end.total, 5);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_return_none() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        let updated = store
            .update(999, payload("Iracema", "José de Alencar", 1865))
            .await
            .expect("update");
        assert!(updated.is_none());
        assert!(store.delete(999).await.expect("delete").is_none());
        assert_eq!(
            store.list(PageWindow { page: 1, limit: 10 }).await.expect("list").total,
            0
        );
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_delete_removes() {
        let store = MemoryCatalog::spawn().await.expect("spawn");
        store
            .insert(Some(4), payload("Memórias Póstumas", "Machado", 1880))
            .await
            .expect("insert");

        let updated = store
            .update(4, payload("Memórias Póstumas de Brás Cubas", "Machado de Assis", 1881))
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.id_livro, 4);
        assert_eq!(updated.autor_livro, "Machado de Assis");
        assert_eq!(updated.ano_livro, 1881);

        let removed = store.delete(4).await.expect("delete").expect("present");
        assert_eq!(removed, updated);
        assert!(store.get(4).await.expect("get").is_none());
        assert!(store.delete(4).await.expect("delete").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_are_serialized() {
        let store = MemoryCatalog::spawn().await.expect("spawn");

        let distinct: Vec<_> = (1..=32)
            .map(|id| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(Some(id), payload(&format!("Livro {id}"), "Autor", 2000))
                        .await
                })
            })
            .collect();
        for handle in distinct {
            handle.await.expect("task").expect("distinct id succeeds");
        }

        let same: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(Some(100), payload(&format!("Candidato {n}"), "Autor", 2000))
                        .await
                })
            })
            .collect();
        let mut ok = 0;
        for handle in same {
            match handle.await.expect("task") {
                Ok(_) => ok += 1,
                Err(CatalogError::Conflict) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);

        let page = store.list(PageWindow { page: 1, limit: 100 }).await.expect("list");
        assert_eq!(page.total, 33);
        let ids: Vec<i64> = page.books.iter().map(|b| b.id_livro).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
