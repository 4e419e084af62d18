use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    book::{Book, BookCreate},
    extractor::json::ApiJson,
    state::ApiState,
};

pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookCreate,
    responses(
        (status = 201, description = "The created book", body = Book),
        (status = 400, description = "Body is not JSON"),
        (status = 415, description = "Body is not `application/json`"),
        (status = 422, description = "Body does not describe a book")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(create): ApiJson<BookCreate>,
) -> CreateBookResponse {
    let record = state.books().create(create).await;

    tracing::info!(id = record.id, "Created book");

    CreateBookResponse(Book::from_attributes(&record))
}
