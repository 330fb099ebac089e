//! Search script repository
//!
//! Search scripts live on the field-definition catalog. Rows are never
//! inserted from here: the catalog carries schema metadata this system
//! cannot default, so push is update-only for this kind.

use sqlx::PgPool;

use scriptsync_common::Result;

use crate::domain::entities::{SearchScriptIdentity, SearchScriptRow};

#[derive(Clone)]
pub struct SearchScriptRepository {
    pool: PgPool,
}

impl SearchScriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search scripts of one table, skipping fields with no script content
    pub async fn list_for_table(&self, table_name: &str) -> Result<Vec<SearchScriptRow>> {
        let rows = sqlx::query_as::<_, SearchScriptRow>(
            r#"
            SELECT alanad AS field_name, aramascript AS content
            FROM flddef
            WHERE tabload = $1 AND aramascript <> ''
            "#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Whether a field-definition row exists for this identity
    pub async fn exists(&self, id: &SearchScriptIdentity) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM flddef WHERE tabload = $1 AND alanad = $2",
        )
        .bind(&id.table_name)
        .bind(&id.field_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Replace the script column of an existing field definition
    pub async fn update_content(&self, id: &SearchScriptIdentity, content: &str) -> Result<()> {
        sqlx::query("UPDATE flddef SET aramascript = $1 WHERE tabload = $2 AND alanad = $3")
            .bind(content)
            .bind(&id.table_name)
            .bind(&id.field_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
