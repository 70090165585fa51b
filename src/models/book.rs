use sqlx::SqlitePool;

use crate::AppError;

/// The slice of a book the author pages show.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

pub async fn get_books_by_author(
    pool: &SqlitePool,
    author_id: i64,
) -> Result<Vec<BookSummary>, AppError> {
    let books = sqlx::query_as::<_, BookSummary>(
        r#"
        SELECT id, title, summary
        FROM books
        WHERE author_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;
    Ok(books)
}

pub async fn insert_book(
    pool: &SqlitePool,
    title: &str,
    summary: &str,
    author_id: i64,
) -> Result<i64, AppError> {
    let id = sqlx::query(
        r#"
        INSERT INTO books (title, summary, author_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(summary)
    .bind(author_id)
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn only_books_of_that_author_are_returned() {
        let pool = connect_in_memory().await.unwrap();
        let first = insert_book(&pool, "Foundation", "Psychohistory.", 1).await.unwrap();
        insert_book(&pool, "Dune", "Spice.", 2).await.unwrap();
        let second = insert_book(&pool, "I, Robot", "Three laws.", 1).await.unwrap();

        let books = get_books_by_author(&pool, 1).await.unwrap();
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(books[0].url(), format!("/catalog/book/{}", first));
        assert!(get_books_by_author(&pool, 3).await.unwrap().is_empty());
    }
}
