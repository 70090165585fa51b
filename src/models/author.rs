use sqlx::SqlitePool;
use time::Date;

use crate::{
    util::{format_date, format_date_input},
    AppError,
};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

impl Author {
    pub fn url(&self) -> String {
        author_url(self.id)
    }

    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth.as_ref().map(format_date).unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death.as_ref().map(format_date).unwrap_or_default()
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }
}

pub fn author_url(id: i64) -> String {
    format!("/catalog/author/{}", id)
}

/// The four editable fields, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorFields {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

/// Submitted form values kept as typed so a rejected form can be shown again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorDraft {
    pub id: Option<i64>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        AuthorDraft {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author
                .date_of_birth
                .as_ref()
                .map(format_date_input)
                .unwrap_or_default(),
            date_of_death: author
                .date_of_death
                .as_ref()
                .map(format_date_input)
                .unwrap_or_default(),
        }
    }
}

pub async fn get_author_list(pool: &SqlitePool) -> Result<Vec<Author>, AppError> {
    let authors = sqlx::query_as::<_, Author>(
        r#"
        SELECT id, first_name, family_name, date_of_birth, date_of_death
        FROM authors
        ORDER BY family_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(authors)
}

pub async fn get_author_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Author>, AppError> {
    let author = sqlx::query_as::<_, Author>(
        r#"
        SELECT id, first_name, family_name, date_of_birth, date_of_death
        FROM authors WHERE authors.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(author)
}

pub async fn insert_author(pool: &SqlitePool, fields: &AuthorFields) -> Result<Author, AppError> {
    let id = sqlx::query(
        r#"
        INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.family_name)
    .bind(fields.date_of_birth)
    .bind(fields.date_of_death)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Author {
        id,
        first_name: fields.first_name.clone(),
        family_name: fields.family_name.clone(),
        date_of_birth: fields.date_of_birth,
        date_of_death: fields.date_of_death,
    })
}

/// Overwrites the editable fields in place. `None` when there is no author with that id.
pub async fn update_author(
    pool: &SqlitePool,
    id: i64,
    fields: &AuthorFields,
) -> Result<Option<Author>, AppError> {
    let updated = sqlx::query(
        r#"
        UPDATE authors
        SET first_name = ?, family_name = ?, date_of_birth = ?, date_of_death = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.family_name)
    .bind(fields.date_of_birth)
    .bind(fields.date_of_death)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(None);
    }
    get_author_by_id(pool, id).await
}

/// Removes the author unless a book references it, as one statement.
/// Returns whether a row was deleted.
pub async fn delete_author_if_unreferenced(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM authors
        WHERE id = ?
        AND NOT EXISTS (SELECT 1 FROM books WHERE books.author_id = ?)
        "#,
    )
    .bind(id)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}
