use std::sync::Arc;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

pub mod config;
pub mod db;
pub mod models;
pub mod util;
pub mod validation;
pub mod views;

use crate::config::AppConfig;

// Make our own error that wraps `eyre::Report` together with the status to answer with.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub report: eyre::Report,
}

impl AppError {
    pub fn not_found(message: &str) -> Self {
        AppError {
            status: StatusCode::NOT_FOUND,
            report: eyre::eyre!("{}", message),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate {
    title: String,
    message: String,
    status_code: StatusCode,
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("{}: {:?}", self.status, self.report);
        } else {
            log::warn!("{}: {}", self.status, self.report);
        }
        (
            self.status,
            ErrorPageTemplate {
                title: "Error".to_string(),
                message: self.report.to_string(),
                status_code: self.status,
            },
        )
            .into_response()
    }
}

// This enables using `?` on anything that converts into `eyre::Report` (sqlx errors included).
impl<E> From<E> for AppError
where
    E: Into<eyre::Report>,
{
    fn from(err: E) -> Self {
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            report: err.into(),
        }
    }
}

async fn not_found() -> AppError {
    AppError::not_found("Page not found")
}

async fn redirect_to_catalog() -> Redirect {
    Redirect::to("/catalog/authors")
}

/// Builds the whole application router around an already migrated pool.
pub fn app(pool: SqlitePool, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(redirect_to_catalog))
        .nest("/catalog", views::authors::get_routes())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(not_found)
        .layer(Extension(Arc::new(pool)))
}
