use serde::Serialize;

use crate::catalog::Catalog;

/// Everything the detail overlay shows for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    pub id: String,
    pub image: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub description: String,
}

impl BookDetail {
    pub fn subtitle(&self) -> String {
        format!("{} ({})", self.author, self.year)
    }
}

/// Looks `id` up in the full catalog, not just the current matches, so any
/// preview rendered on an earlier page stays selectable.
pub fn lookup(catalog: &Catalog, id: &str) -> Option<BookDetail> {
    let book = catalog.find_book(id)?;
    Some(BookDetail {
        id: book.id.clone(),
        image: book.image.clone(),
        title: book.title.clone(),
        author: catalog.author_name(&book.author).to_owned(),
        year: book.published_year(),
        description: book.description.clone(),
    })
}
