use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{validation::PayloadReader, FromPayload, ValidationError};

/// The fields required to create a new book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl FromPayload for BookCreate {
    #[tracing::instrument(name = "book_create_from_payload", skip_all)]
    fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;

        let title = reader.required("title", "string");
        let author = reader.required("author", "string");
        let publication_year = reader.optional("publication_year", "integer");
        let isbn = reader.optional("isbn", "string");

        let book = title.zip(author).map(|(title, author)| BookCreate {
            title,
            author,
            publication_year,
            isbn,
        });

        reader.finish(book)
    }
}
