use std::sync::Arc;

use askama::Template;
use axum::{debug_handler, extract::Path, Extension};
use futures::try_join;
use sqlx::SqlitePool;

use crate::{
    models::{
        author::{get_author_by_id, Author},
        book::{get_books_by_author, BookSummary},
    },
    AppError,
};

#[derive(Template)]
#[template(path = "author_detail.html")]
pub struct AuthorDetail {
    title: String,
    author: Author,
    books: Vec<BookSummary>,
}

#[debug_handler]
pub async fn view_author_detail(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(id): Path<i64>,
) -> Result<AuthorDetail, AppError> {
    let (author, books) = try_join!(get_author_by_id(&pool, id), get_books_by_author(&pool, id))?;
    let author = match author {
        Some(author) => author,
        None => return Err(AppError::not_found("Author not found")),
    };
    Ok(AuthorDetail {
        title: "Author Detail".to_string(),
        author,
        books,
    })
}
