use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::Book,
    error::{ErrorVerbosityProvider, ResourceError},
    extractor::path::ApiPath,
    state::ApiState,
};

use super::{BookError, BookErrorType};

pub struct GetBookResponse(pub Book);

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "Book not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<GetBookResponse, BookError> {
    match state.books().get(id).await {
        Some(record) => Ok(GetBookResponse(Book::from_attributes(&record))),
        None => Err(ResourceError::new(
            state.error_verbosity(),
            BookErrorType::NotFound { id },
        )),
    }
}
