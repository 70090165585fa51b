use std::sync::Arc;

use askama::Template;
use axum::Extension;
use sqlx::SqlitePool;

use crate::{
    models::author::{get_author_list, Author},
    AppError,
};

#[derive(Template)]
#[template(path = "author_list.html")]
pub struct AuthorList {
    title: String,
    authors: Vec<Author>,
}

#[axum::debug_handler]
pub async fn view_author_list(
    Extension(pool): Extension<Arc<SqlitePool>>,
) -> Result<AuthorList, AppError> {
    let authors = get_author_list(&pool).await?;
    Ok(AuthorList {
        title: "Author List".to_string(),
        authors,
    })
}
