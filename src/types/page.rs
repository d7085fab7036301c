use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::Book;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const EMPTY_CATALOG_MESSAGE: &str = "Não existe nenhum livro.";

/// Query string of `GET /livros`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageQuery {
    pub fn window(self) -> Result<PageWindow, CatalogError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if page < 1 || limit < 1 {
            return Err(CatalogError::BadRequest(
                "page e limit devem ser maiores ou iguais a 1".to_string(),
            ));
        }
        Ok(PageWindow { page, limit })
    }
}

impl PageWindow {
    /// Index of the first record in the window. Saturates on huge pages.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Half-open `usize` range of the window, clamped to `len`.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(len);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        start..start.saturating_add(limit).min(len)
    }
}

/// One page of books plus the size of the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub total: i64,
    pub books: Vec<Book>,
}

/// Body of `GET /livros`. An empty catalog yields only a message.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ListResponse {
    Page {
        page: i64,
        limit: i64,
        total: i64,
        livros: Vec<Book>,
    },
    Empty {
        message: String,
    },
}

impl ListResponse {
    pub fn from_page(window: PageWindow, page: Page) -> Self {
        if page.total == 0 {
            return Self::Empty {
                message: EMPTY_CATALOG_MESSAGE.to_string(),
            };
        }
        Self::Page {
            page: window.page,
            limit: window.limit,
            total: page.total,
            livros: page.books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let window = PageQuery::default().window().expect("defaults are valid");
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn rejects_zero_and_negative_values() {
        for (page, limit) in [(Some(0), None), (None, Some(0)), (Some(-3), Some(5))] {
            let res = PageQuery { page, limit }.window();
            assert!(matches!(res, Err(CatalogError::BadRequest(_))));
        }
    }

    #[test]
    fn range_clamps_to_catalog_length() {
        let window = PageWindow { page: 3, limit: 4 };
        assert_eq!(window.offset(), 8);
        assert_eq!(window.range(10), 8..10);
        assert_eq!(window.range(5), 5..5);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let window = PageWindow {
            page: i64::MAX,
            limit: i64::MAX,
        };
        assert_eq!(window.offset(), i64::MAX);
        assert_eq!(window.range(3), 3..3);
    }

    #[test]
    fn empty_catalog_has_no_metadata() {
        let resp = ListResponse::from_page(
            PageWindow { page: 1, limit: 10 },
            Page {
                total: 0,
                books: Vec::new(),
            },
        );
        let json = serde_json::to_value(&resp).expect("serializable");
        assert_eq!(json, serde_json::json!({ "message": EMPTY_CATALOG_MESSAGE }));
    }
}
