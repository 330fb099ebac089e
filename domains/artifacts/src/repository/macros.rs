//! Macro repository

use sqlx::PgPool;

use scriptsync_common::Result;

use crate::domain::entities::{macro_button_defaults, MacroIdentity, MacroRow};

#[derive(Clone)]
pub struct MacroRepository {
    pool: PgPool,
}

impl MacroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Macros of one application scope, bounded to the acting user. The
    /// empty application name selects the global scope.
    pub async fn list_for_app(&self, app_name: &str, user_name: &str) -> Result<Vec<MacroRow>> {
        let rows = sqlx::query_as::<_, MacroRow>(
            r#"
            SELECT appname AS app_name, macroname AS macro_name, macro AS content
            FROM macros
            WHERE appname = $1 AND username = $2
            "#,
        )
        .bind(app_name)
        .bind(user_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Scope discovery for whole-domain pulls, ordered for stable
    /// enumeration
    pub async fn distinct_app_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT appname FROM macros ORDER BY appname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    /// Whether a row exists for this identity
    pub async fn exists(&self, id: &MacroIdentity) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM macros WHERE appname = $1 AND macroname = $2 AND username = $3",
        )
        .bind(&id.app_name)
        .bind(&id.macro_name)
        .bind(&id.user_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Replace the content column of an existing row
    pub async fn update_content(&self, id: &MacroIdentity, content: &str) -> Result<()> {
        sqlx::query(
            "UPDATE macros SET macro = $1 WHERE appname = $2 AND macroname = $3 AND username = $4",
        )
        .bind(content)
        .bind(&id.app_name)
        .bind(&id.macro_name)
        .bind(&id.user_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a new row with identity columns and macro insert defaults
    pub async fn insert(&self, id: &MacroIdentity, content: &str) -> Result<()> {
        let (create_button, caption) = macro_button_defaults(&id.macro_name);
        sqlx::query(
            r#"
            INSERT INTO macros (appname, username, macroname, createbutton, caption,
                                categoryname, shortcut, timerenabled, timerinterval,
                                startup, macro, description)
            VALUES ($1, $2, $3, $4, $5, '', '', 0, 0, 0, $6, '')
            "#,
        )
        .bind(&id.app_name)
        .bind(&id.user_name)
        .bind(&id.macro_name)
        .bind(create_button)
        .bind(caption)
        .bind(content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
