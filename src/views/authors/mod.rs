use axum::{routing::get, Router};

mod author_delete;
mod author_detail;
mod author_form;
mod author_list;

pub fn get_routes() -> axum::Router {
    Router::new()
        .route("/authors", get(author_list::view_author_list))
        .route(
            "/author/create",
            get(author_form::view_create_author).post(author_form::post_create_author),
        )
        .route("/author/:id", get(author_detail::view_author_detail))
        .route(
            "/author/:id/update",
            get(author_form::view_update_author).post(author_form::post_update_author),
        )
        .route(
            "/author/:id/delete",
            get(author_delete::view_delete_author).post(author_delete::post_delete_author),
        )
}
