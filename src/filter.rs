use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Book;

pub const ANY: &str = "any";

/// A dropdown choice: either no restriction or one specific id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Any,
    Id(String),
}

impl Selection {
    /// Missing, empty and `any` values all mean no restriction.
    pub fn from_form(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ANY) => Self::Any,
            Some(id) => Self::Id(id.to_owned()),
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Id(id) => id == value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub genre: Selection,
    pub author: Selection,
    pub title: String,
}

impl SearchCriteria {
    pub fn from_form(fields: &BTreeMap<String, String>) -> Self {
        Self {
            genre: Selection::from_form(fields.get("genre").map(String::as_str)),
            author: Selection::from_form(fields.get("author").map(String::as_str)),
            title: fields.get("title").cloned().unwrap_or_default(),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let genre_ok = match &self.genre {
            Selection::Any => true,
            Selection::Id(genre) => book.genres.iter().any(|g| g == genre),
        };
        let title_ok = self.title.trim().is_empty()
            || book
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());

        genre_ok && title_ok && self.author.admits(&book.author)
    }

    /// Books satisfying every criterion, in source order.
    pub fn apply(&self, books: &[Arc<Book>]) -> Vec<Arc<Book>> {
        books
            .iter()
            .filter(|book| self.matches(book))
            .cloned()
            .collect()
    }
}
