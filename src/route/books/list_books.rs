use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{book::Book, state::ApiState};

pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Lists all books ordered by id.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by id", body = [Book])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(State(state): State<ApiState>) -> ListBooksResponse {
    let books = state
        .books()
        .list()
        .await
        .iter()
        .map(Book::from_attributes)
        .collect();

    ListBooksResponse(books)
}
