use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    error::{ErrorVerbosityProvider, ResourceError},
    extractor::path::ApiPath,
    state::ApiState,
};

use super::{BookError, BookErrorType};

pub struct DeleteBookResponse;

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<DeleteBookResponse, BookError> {
    match state.books().delete(id).await {
        Some(_) => {
            tracing::info!("Deleted book");

            Ok(DeleteBookResponse)
        }
        None => Err(ResourceError::new(
            state.error_verbosity(),
            BookErrorType::NotFound { id },
        )),
    }
}
