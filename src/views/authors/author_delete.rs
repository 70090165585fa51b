use std::sync::Arc;

use askama::Template;
use askama_axum::IntoResponse;
use axum::{
    extract::Path,
    response::{Redirect, Response},
    Extension,
};
use futures::try_join;
use sqlx::SqlitePool;

use crate::{
    models::{
        author::{delete_author_if_unreferenced, get_author_by_id, Author},
        book::{get_books_by_author, BookSummary},
    },
    AppError,
};

const AUTHOR_LIST_URL: &str = "/catalog/authors";

#[derive(Template)]
#[template(path = "author_delete.html")]
pub struct AuthorDelete {
    title: String,
    author: Author,
    books: Vec<BookSummary>,
}

impl AuthorDelete {
    fn new(author: Author, books: Vec<BookSummary>) -> Self {
        AuthorDelete {
            title: "Delete Author".to_string(),
            author,
            books,
        }
    }
}

#[axum::debug_handler]
pub async fn view_delete_author(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let (author, books) = try_join!(get_author_by_id(&pool, id), get_books_by_author(&pool, id))?;
    match author {
        Some(author) => Ok(AuthorDelete::new(author, books).into_response()),
        None => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
    }
}

#[axum::debug_handler]
pub async fn post_delete_author(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let (author, books) = try_join!(get_author_by_id(&pool, id), get_books_by_author(&pool, id))?;
    let author = match author {
        Some(author) => author,
        // nothing left to delete
        None => return Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
    };
    if !books.is_empty() {
        log::info!(
            "refusing to delete author {}: {} book(s) still reference it",
            id,
            books.len()
        );
        return Ok(AuthorDelete::new(author, books).into_response());
    }

    delete_unless_referenced(&pool, id).await
}

/// Deletes an author already seen without books. A book added, or the author removed,
/// since that read is picked up here instead of being lost.
async fn delete_unless_referenced(pool: &SqlitePool, id: i64) -> Result<Response, AppError> {
    if delete_author_if_unreferenced(pool, id).await? {
        log::info!("deleted author {}", id);
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    }

    let (author, books) = try_join!(get_author_by_id(pool, id), get_books_by_author(pool, id))?;
    match author {
        Some(author) if !books.is_empty() => {
            log::warn!("author {} gained a book before it could be deleted", id);
            Ok(AuthorDelete::new(author, books).into_response())
        }
        _ => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
    }
}
