use axum::Json;
use utoipa::OpenApi;

use crate::{
    book::{Book, BookCreate, BookUpdate},
    route::books::{create_book, delete_book, get_book, list_books, update_book},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_books::list_books,
        get_book::get_book,
        create_book::create_book,
        update_book::update_book,
        delete_book::delete_book
    ),
    components(schemas(Book, BookCreate, BookUpdate)),
    tags((name = "books", description = "Book catalogue"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document of the books API.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
