//! Contacts table bootstrap.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppResult;

/// Connect to `database_url`, create the `contacts` table if needed and
/// close the pool again.
pub async fn init_contacts_schema(database_url: &str) -> AppResult<()> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    let result = create_contacts_table(&pool).await;
    pool.close().await;
    result
}

/// Create the `contacts` table. Safe to run repeatedly.
pub async fn create_contacts_table(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL CHECK (length(full_name) <= 100),
            email TEXT NOT NULL CHECK (length(email) <= 150),
            phone TEXT CHECK (phone IS NULL OR length(phone) <= 20),
            message TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn has_contacts_table(pool: &SqlitePool) -> bool {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'contacts'",
        )
        .fetch_optional(pool)
        .await
        .unwrap()
        .is_some()
    }

    #[tokio::test]
    async fn test_create_contacts_table_is_idempotent() {
        let pool = memory_pool().await;

        create_contacts_table(&pool).await.unwrap();
        create_contacts_table(&pool).await.unwrap();

        assert!(has_contacts_table(&pool).await);
    }

    #[tokio::test]
    async fn test_contacts_constraints() {
        let pool = memory_pool().await;
        create_contacts_table(&pool).await.unwrap();

        sqlx::query("INSERT INTO contacts (full_name, email, message) VALUES (?, ?, ?)")
            .bind("Nguyen Van A")
            .bind("a@example.com")
            .bind("hello")
            .execute(&pool)
            .await
            .unwrap();

        let too_long = "x".repeat(101);
        let result = sqlx::query("INSERT INTO contacts (full_name, email, message) VALUES (?, ?, ?)")
            .bind(too_long)
            .bind("b@example.com")
            .bind("hello")
            .execute(&pool)
            .await;
        assert!(result.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_init_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webapp_db.sqlite");
        let url = format!("sqlite://{}", path.display());

        init_contacts_schema(&url).await.unwrap();

        assert!(path.exists());
    }
}
