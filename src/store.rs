use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use crate::book::{BookAttributes, BookCreate, BookUpdate};

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

impl BookRecord {
    fn new(id: i64, create: BookCreate) -> Self {
        Self {
            id,
            title: create.title,
            author: create.author,
            publication_year: create.publication_year,
            isbn: create.isbn,
        }
    }

    fn apply(&mut self, update: BookUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }

        if let Some(author) = update.author {
            self.author = author;
        }

        update.publication_year.apply(&mut self.publication_year);
        update.isbn.apply(&mut self.isbn);
    }
}

impl BookAttributes for BookRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }
}

#[derive(Debug, Default)]
struct BookTable {
    last_id: i64,
    books: BTreeMap<i64, BookRecord>,
}

/// In-memory book storage. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    table: Arc<RwLock<BookTable>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all books ordered by id.
    pub async fn list(&self) -> Vec<BookRecord> {
        self.table.read().await.books.values().cloned().collect()
    }

    pub async fn get(&self, id: i64) -> Option<BookRecord> {
        self.table.read().await.books.get(&id).cloned()
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, create: BookCreate) -> BookRecord {
        let mut table = self.table.write().await;

        table.last_id += 1;

        let id = table.last_id;
        let record = BookRecord::new(id, create);

        table.books.insert(id, record.clone());

        tracing::debug!(id, "Book created");

        record
    }

    /// Applies `update` to the book with `id`. Returns `None` if there is no such book.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: BookUpdate) -> Option<BookRecord> {
        let mut table = self.table.write().await;
        let record = table.books.get_mut(&id)?;

        record.apply(update);

        tracing::debug!("Book updated");

        Some(record.clone())
    }

    /// Removes the book with `id` and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Option<BookRecord> {
        let removed = self.table.write().await.books.remove(&id);

        if removed.is_some() {
            tracing::debug!("Book deleted");
        }

        removed
    }
}
