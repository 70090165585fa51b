use std::sync::Arc;

use askama::Template;
use askama_axum::IntoResponse;
use axum::{
    extract::Path,
    response::{Redirect, Response},
    Extension,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    models::author::{
        get_author_by_id, insert_author, update_author, AuthorDraft, AuthorFields,
    },
    util::parse_iso_date,
    validation::{body, FieldError, FormFields, ValidationResult, Validator},
    AppError,
};

#[derive(Template)]
#[template(path = "author_form.html")]
pub struct AuthorFormPage {
    title: String,
    author: AuthorDraft,
    errors: Vec<FieldError>,
}

#[derive(Deserialize, Default)]
pub struct AuthorForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    family_name: String,
    #[serde(default)]
    date_of_birth: String,
    #[serde(default)]
    date_of_death: String,
}

impl FormFields for AuthorForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "first_name" => Some(&self.first_name),
            "family_name" => Some(&self.family_name),
            "date_of_birth" => Some(&self.date_of_birth),
            "date_of_death" => Some(&self.date_of_death),
            _ => None,
        }
    }
}

fn create_rules() -> Validator {
    Validator::new(vec![
        body("first_name")
            .trim()
            .min_length(2, "First name must be specified.")
            .alphanumeric("First name has non-alphanumeric character."),
        body("family_name")
            .trim()
            .min_length(2, "Family name must be specified.")
            .alphanumeric("Family name has non-alphanumeric character."),
        body("date_of_birth")
            .trim()
            .optional()
            .iso_date("Invalid date of birth"),
        body("date_of_death")
            .trim()
            .optional()
            .iso_date("Invalid date of death"),
    ])
}

// updates are stricter on name length and terser in their messages
fn update_rules() -> Validator {
    Validator::new(vec![
        body("first_name")
            .trim()
            .min_length(3, "First name must be specified")
            .alphanumeric("First name has non alphanumeric character"),
        body("family_name")
            .trim()
            .min_length(3, "Family name must be specified")
            .alphanumeric("Family name has non alphanumeric character"),
        body("date_of_birth").trim().optional().iso_date("Invalid date"),
        body("date_of_death").trim().optional().iso_date("Invalid date"),
    ])
}

fn draft_from(result: &ValidationResult, id: Option<i64>) -> AuthorDraft {
    AuthorDraft {
        id,
        first_name: result.value("first_name").to_string(),
        family_name: result.value("family_name").to_string(),
        date_of_birth: result.value("date_of_birth").to_string(),
        date_of_death: result.value("date_of_death").to_string(),
    }
}

// Only called once validation passed, so unparseable dates cannot reach here.
fn fields_from(result: &ValidationResult) -> AuthorFields {
    AuthorFields {
        first_name: result.value("first_name").to_string(),
        family_name: result.value("family_name").to_string(),
        date_of_birth: parse_iso_date(result.value("date_of_birth")),
        date_of_death: parse_iso_date(result.value("date_of_death")),
    }
}

#[axum::debug_handler]
pub async fn view_create_author() -> Result<AuthorFormPage, AppError> {
    Ok(AuthorFormPage {
        title: "Create Author".to_string(),
        author: AuthorDraft::default(),
        errors: Vec::new(),
    })
}

#[axum::debug_handler]
pub async fn post_create_author(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Form(data): Form<AuthorForm>,
) -> Result<Response, AppError> {
    let result = create_rules().validate(&data);
    if !result.is_empty() {
        log::debug!("rejected author submission: {:?}", result.errors());
        return Ok(AuthorFormPage {
            title: "Create Author".to_string(),
            author: draft_from(&result, None),
            errors: result.into_errors(),
        }
        .into_response());
    }

    let author = insert_author(&pool, &fields_from(&result)).await?;
    log::info!("created author {} ({})", author.id, author.name());
    Ok(Redirect::to(&author.url()).into_response())
}

#[axum::debug_handler]
pub async fn view_update_author(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(id): Path<i64>,
) -> Result<AuthorFormPage, AppError> {
    let author = match get_author_by_id(&pool, id).await? {
        Some(author) => author,
        None => return Err(AppError::not_found("Author not found")),
    };
    Ok(AuthorFormPage {
        title: "Update Author".to_string(),
        author: AuthorDraft::from(&author),
        errors: Vec::new(),
    })
}

#[axum::debug_handler]
pub async fn post_update_author(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(id): Path<i64>,
    Form(data): Form<AuthorForm>,
) -> Result<Response, AppError> {
    let result = update_rules().validate(&data);
    if !result.is_empty() {
        log::debug!("rejected update of author {}: {:?}", id, result.errors());
        return Ok(AuthorFormPage {
            title: "Update Author".to_string(),
            author: draft_from(&result, Some(id)),
            errors: result.into_errors(),
        }
        .into_response());
    }

    let author = match update_author(&pool, id, &fields_from(&result)).await? {
        Some(author) => author,
        None => return Err(AppError::not_found("Author not found")),
    };
    log::info!("updated author {}", author.id);
    Ok(Redirect::to(&author.url()).into_response())
}
