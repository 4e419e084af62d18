use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Read access to the fields of a stored book.
///
/// Implemented by whatever holds books, so that [`Book`] can be built without
/// knowing the concrete type.
pub trait BookAttributes {
    fn id(&self) -> i64;

    fn title(&self) -> &str;

    fn author(&self) -> &str;

    fn publication_year(&self) -> Option<i32>;

    fn isbn(&self) -> Option<&str>;
}

/// A book as presented to clients.
///
/// Optional fields are always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl Book {
    pub fn from_attributes<A>(source: &A) -> Self
    where
        A: BookAttributes + ?Sized,
    {
        Book {
            id: source.id(),
            title: source.title().to_owned(),
            author: source.author().to_owned(),
            publication_year: source.publication_year(),
            isbn: source.isbn().map(ToOwned::to_owned),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    struct Row {
        id: i64,
        title: &'static str,
        author: &'static str,
        publication_year: Option<i32>,
        isbn: Option<&'static str>,
    }

    impl BookAttributes for Row {
        fn id(&self) -> i64 {
            self.id
        }

        fn title(&self) -> &str {
            self.title
        }

        fn author(&self) -> &str {
            self.author
        }

        fn publication_year(&self) -> Option<i32> {
            self.publication_year
        }

        fn isbn(&self) -> Option<&str> {
            self.isbn
        }
    }

    #[test]
    fn read_shape_is_copied_from_attributes() {
        let row = Row {
            id: 1,
            title: "Dune",
            author: "Frank Herbert",
            publication_year: Some(1965),
            isbn: None,
        };

        let book = Book::from_attributes(&row);

        assert_eq!(
            serde_json::to_string(&book).unwrap(),
            r#"{"id":1,"title":"Dune","author":"Frank Herbert","publication_year":1965,"isbn":null}"#
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let row: Box<dyn BookAttributes> = Box::new(Row {
            id: 2,
            title: "Children of Dune",
            author: "Frank Herbert",
            publication_year: None,
            isbn: Some("978-0593098240"),
        });

        let book = Book::from_attributes(&*row);

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": 2,
                "title": "Children of Dune",
                "author": "Frank Herbert",
                "publication_year": null,
                "isbn": "978-0593098240",
            })
        );
    }
}
