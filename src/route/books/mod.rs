use axum::http::StatusCode;
use serde::Serialize;

use crate::error::{ResourceError, ResourceErrorProvider};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum BookErrorType {
    NotFound {
        #[serde(skip)]
        id: i64,
    },
}

#[derive(Debug, Serialize)]
pub struct BookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for BookErrorType {
    type Context = BookErrorContext;

    fn status_code(&self) -> StatusCode {
        match self {
            BookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            BookErrorType::NotFound { .. } => "Book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            BookErrorType::NotFound { id } => BookErrorContext {
                reason: format!("Book with id {id} not found"),
            },
        }
    }
}

pub type BookError = ResourceError<BookErrorType, BookErrorContext>;
