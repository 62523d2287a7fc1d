use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Book, Catalog};

/// Items rendered per page.
pub const BOOKS_PER_PAGE: usize = 36;

/// Compact clickable representation of a book in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub id: String,
    pub image: String,
    pub title: String,
    pub author: String,
}

impl Preview {
    pub fn from_book(book: &Book, catalog: &Catalog) -> Self {
        Self {
            id: book.id.clone(),
            image: book.image.clone(),
            title: book.title.clone(),
            author: catalog.author_name(&book.author).to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowMoreButton {
    pub remaining: usize,
    pub disabled: bool,
}

impl ShowMoreButton {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        let remaining = remaining(total, page, page_size);
        Self {
            remaining,
            disabled: remaining == 0,
        }
    }

    pub fn label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

/// Matches not yet rendered once `page` windows are on screen.
pub fn remaining(total: usize, page: usize, page_size: usize) -> usize {
    total.saturating_sub(page.saturating_mul(page_size))
}

/// The `page`-th zero-based window of `matches`; empty once past the end.
pub fn window(matches: &[Arc<Book>], page: usize, page_size: usize) -> &[Arc<Book>] {
    let start = page.saturating_mul(page_size).min(matches.len());
    let end = start.saturating_add(page_size).min(matches.len());
    &matches[start..end]
}

pub fn previews(books: &[Arc<Book>], catalog: &Catalog) -> Vec<Preview> {
    books
        .iter()
        .map(|book| Preview::from_book(book, catalog))
        .collect()
}
