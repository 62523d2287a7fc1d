use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Datelike as _, NaiveDate, NaiveTime, Utc};
use url::Url;

use crate::formats::{BookRecord, DatasetFile};

pub const UNKNOWN_AUTHOR: &str = "Unknown author";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub published: DateTime<Utc>,
    pub author: String,
    pub genres: Vec<String>,
}

impl Book {
    pub fn published_year(&self) -> i32 {
        self.published.year()
    }
}

/// Read-only dataset: books in source order plus the author and genre tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Arc<Book>>,
    authors: BTreeMap<String, String>,
    genres: BTreeMap<String, String>,
}

impl Catalog {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset: {}", path.display()))?;

        let dataset: DatasetFile = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("parse json dataset: {}", path.display()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&contents)
                .with_context(|| format!("parse yaml dataset: {}", path.display()))?,
            _ => anyhow::bail!(
                "unsupported dataset format (expected .json, .yaml or .yml): {}",
                path.display()
            ),
        };

        let catalog = Self::from_dataset(dataset)?;
        tracing::info!(
            path = %path.display(),
            books = catalog.books.len(),
            authors = catalog.authors.len(),
            genres = catalog.genres.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_dataset(dataset: DatasetFile) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(dataset.books.len());

        for record in dataset.books {
            if !seen.insert(record.id.clone()) {
                anyhow::bail!("duplicate book id: {}", record.id);
            }
            if !dataset.authors.contains_key(&record.author) {
                tracing::warn!(book = %record.id, author = %record.author, "unknown author id");
            }
            if Url::parse(&record.image).is_err() {
                tracing::warn!(book = %record.id, image = %record.image, "image is not an absolute url");
            }
            let book = book_from_record(record)?;
            books.push(Arc::new(book));
        }

        Ok(Self {
            books,
            authors: dataset.authors,
            genres: dataset.genres,
        })
    }

    pub fn books(&self) -> &[Arc<Book>] {
        &self.books
    }

    pub fn authors(&self) -> &BTreeMap<String, String> {
        &self.authors
    }

    pub fn genres(&self) -> &BTreeMap<String, String> {
        &self.genres
    }

    pub fn author_name(&self, author_id: &str) -> &str {
        self.authors
            .get(author_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Linear scan over the whole catalog, independent of any active filter.
    pub fn find_book(&self, id: &str) -> Option<&Arc<Book>> {
        self.books.iter().find(|book| book.id == id)
    }
}

fn book_from_record(record: BookRecord) -> anyhow::Result<Book> {
    let published = parse_published(&record.published)
        .with_context(|| format!("parse published date of book {}", record.id))?;
    Ok(Book {
        id: record.id,
        title: record.title,
        image: record.image,
        description: record.description,
        published,
        author: record.author,
        genres: record.genres,
    })
}

fn parse_published(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got {raw:?}"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}


#[cfg(test)]
mod tests {
    use super::testing::{catalog, record};
    use super::*;

    #[test]
    fn parse_published_accepts_rfc3339_and_plain_dates() -> anyhow::Result<()> {
        assert_eq!(parse_published("1995-09-01T00:00:00.000Z")?.year(), 1995);
        assert_eq!(parse_published("2012-12-31")?.year(), 2012);
        assert_eq!(parse_published("1999-12-31T23:30:00-02:00")?.year(), 2000);
        Ok(())
    }

    #[test]
    fn parse_published_rejects_garbage() {
        let err = parse_published("last tuesday").unwrap_err();
        assert!(format!("{err:#}").contains("expected RFC 3339"));
    }

    #[test]
    fn from_dataset_rejects_duplicate_ids() {
        let dataset = DatasetFile {
            books: vec![record("b1", "One", "a1", &[]), record("b1", "Two", "a1", &[])],
            authors: BTreeMap::new(),
            genres: BTreeMap::new(),
        };
        let err = Catalog::from_dataset(dataset).unwrap_err().to_string();
        assert!(err.contains("duplicate book id: b1"));
    }

    #[test]
    fn find_book_and_author_name() {
        let catalog = catalog(vec![
            record("b1", "Cats", "a1", &["g1"]),
            record("b2", "Dogs", "zz", &["g2"]),
        ]);

        assert_eq!(catalog.find_book("b2").map(|b| b.title.as_str()), Some("Dogs"));
        assert!(catalog.find_book("b3").is_none());
        assert_eq!(catalog.author_name("a1"), "Ann Author");
        assert_eq!(catalog.author_name("zz"), UNKNOWN_AUTHOR);
    }

    #[test]
    fn load_reads_json_and_yaml() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;

        let json_path = temp.path().join("data.json");
        std::fs::write(
            &json_path,
            r#"{"books":[{"id":"b1","title":"Cats","image":"https://example.com/b1.jpg","description":"d","published":"2001-01-01","author":"a1","genres":["g1"]}],"authors":{"a1":"Ann"},"genres":{"g1":"Fiction"}}"#,
        )?;
        let from_json = Catalog::load(&json_path)?;
        assert_eq!(from_json.books().len(), 1);
        assert_eq!(from_json.genres().get("g1").map(String::as_str), Some("Fiction"));

        let yaml_path = temp.path().join("data.yaml");
        std::fs::write(
            &yaml_path,
            "books:\n  - id: b1\n    title: Cats\n    image: https://example.com/b1.jpg\n    published: '2001-01-01'\n    author: a1\nauthors:\n  a1: Ann\n",
        )?;
        let from_yaml = Catalog::load(&yaml_path)?;
        assert_eq!(from_yaml.books()[0].published_year(), 2001);
        assert!(from_yaml.genres().is_empty());

        let txt_path = temp.path().join("data.txt");
        std::fs::write(&txt_path, "")?;
        let err = Catalog::load(&txt_path).unwrap_err().to_string();
        assert!(err.contains("unsupported dataset format"));
        Ok(())
    }
}
