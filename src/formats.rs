use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// On-disk dataset: the books plus the author and genre lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub authors: BTreeMap<String, String>,
    #[serde(default)]
    pub genres: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub published: String,
    pub author: String,
    #[serde(default)]
    pub genres: Vec<String>,
}
