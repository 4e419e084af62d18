use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{patch::Patch, validation::PayloadReader, FromPayload, ValidationError};

/// A partial update of a book.
///
/// Fields that are not sent leave the stored value unchanged.
/// `title` and `author` may be omitted but never set to `null`.
/// `publication_year` and `isbn` are cleared when sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct BookUpdate {
    #[serde(
        default,
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "String")]
    #[schema(value_type = String)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "String")]
    #[schema(value_type = String)]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[schema(value_type = Option<i32>)]
    pub publication_year: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[schema(value_type = Option<String>)]
    pub isbn: Patch<String>,
}

impl BookUpdate {
    /// Returns `true` if the update leaves every field unchanged.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.publication_year.is_unset()
            && self.isbn.is_unset()
    }
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FromPayload for BookUpdate {
    #[tracing::instrument(name = "book_update_from_payload", skip_all)]
    fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        let mut reader = PayloadReader::new(payload)?;

        let update = BookUpdate {
            title: reader.non_null("title", "string"),
            author: reader.non_null("author", "string"),
            publication_year: reader.patch("publication_year", "integer"),
            isbn: reader.patch("isbn", "string"),
        };

        reader.finish(Some(update))
    }
}
