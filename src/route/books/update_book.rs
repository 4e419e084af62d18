use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::{Book, BookUpdate},
    error::{ErrorVerbosityProvider, ResourceError},
    extractor::{json::ApiJson, path::ApiPath},
    state::ApiState,
};

use super::{BookError, BookErrorType};

pub struct UpdateBookResponse(pub Book);

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Applies a partial update. Fields that are not sent stay unchanged.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "The updated book", body = Book),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Body does not describe a book update")
    )
)]
#[tracing::instrument(skip(state, update))]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<BookUpdate>,
) -> Result<UpdateBookResponse, BookError> {
    if update.is_empty() {
        tracing::debug!("Empty update");
    }

    match state.books().update(id, update).await {
        Some(record) => Ok(UpdateBookResponse(Book::from_attributes(&record))),
        None => Err(ResourceError::new(
            state.error_verbosity(),
            BookErrorType::NotFound { id },
        )),
    }
}
