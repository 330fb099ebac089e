//! Library unit repository

use chrono::Utc;
use sqlx::PgPool;

use scriptsync_common::Result;

use crate::domain::entities::{LibraryUnitIdentity, LibraryUnitRow};

#[derive(Clone)]
pub struct LibraryUnitRepository {
    pool: PgPool,
}

impl LibraryUnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scope discovery: every user owning library units, ordered for stable
    /// enumeration
    pub async fn distinct_user_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT username FROM actscr ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    /// Library units owned by one user
    pub async fn list_for_user(&self, user_name: &str) -> Result<Vec<LibraryUnitRow>> {
        let rows = sqlx::query_as::<_, LibraryUnitRow>(
            r#"
            SELECT username AS user_name, unitname AS unit_name, script AS content
            FROM actscr
            WHERE username = $1
            "#,
        )
        .bind(user_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Whether a row exists for this identity
    pub async fn exists(&self, id: &LibraryUnitIdentity) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM actscr WHERE username = $1 AND unitname = $2",
        )
        .bind(&id.user_name)
        .bind(&id.unit_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Replace the content column of an existing row
    pub async fn update_content(&self, id: &LibraryUnitIdentity, content: &str) -> Result<()> {
        sqlx::query("UPDATE actscr SET script = $1 WHERE username = $2 AND unitname = $3")
            .bind(content)
            .bind(&id.user_name)
            .bind(&id.unit_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a new row, stamping the change timestamp
    pub async fn insert(&self, id: &LibraryUnitIdentity, content: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO actscr (username, unitname, changedate, script)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&id.user_name)
        .bind(&id.unit_name)
        .bind(Utc::now())
        .bind(content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
