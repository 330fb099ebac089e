//! Table event script repository

use sqlx::PgPool;

use scriptsync_common::Result;

use crate::domain::entities::{EventScriptIdentity, EventScriptRow};

#[derive(Clone)]
pub struct EventScriptRepository {
    pool: PgPool,
}

impl EventScriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Event scripts of one application, bounded to the company and acting
    /// user
    pub async fn list_for_app(
        &self,
        company_no: i32,
        user_name: &str,
        app_name: &str,
    ) -> Result<Vec<EventScriptRow>> {
        let rows = sqlx::query_as::<_, EventScriptRow>(
            r#"
            SELECT appname AS app_name, tablename AS table_name,
                   event AS event_code, script AS content
            FROM secscr
            WHERE companyno = $1 AND username = $2 AND appname = $3
            "#,
        )
        .bind(company_no)
        .bind(user_name)
        .bind(app_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Scope discovery for whole-domain pulls, ordered for stable
    /// enumeration
    pub async fn distinct_app_names(&self, company_no: i32, user_name: &str) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT appname FROM secscr
            WHERE companyno = $1 AND username = $2
            ORDER BY appname
            "#,
        )
        .bind(company_no)
        .bind(user_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    /// Whether a row exists for this identity
    pub async fn exists(&self, id: &EventScriptIdentity) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM secscr
            WHERE companyno = $1 AND username = $2 AND appname = $3
              AND tablename = $4 AND event = $5
            "#,
        )
        .bind(id.company_no)
        .bind(&id.user_name)
        .bind(&id.app_name)
        .bind(&id.table_name)
        .bind(id.event_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Replace the content column of an existing row
    pub async fn update_content(&self, id: &EventScriptIdentity, content: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE secscr SET script = $1
            WHERE companyno = $2 AND username = $3 AND appname = $4
              AND tablename = $5 AND event = $6
            "#,
        )
        .bind(content)
        .bind(id.company_no)
        .bind(&id.user_name)
        .bind(&id.app_name)
        .bind(&id.table_name)
        .bind(id.event_code)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a new row for this identity
    pub async fn insert(&self, id: &EventScriptIdentity, content: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO secscr (companyno, username, appname, tablename, event, script)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.company_no)
        .bind(&id.user_name)
        .bind(&id.app_name)
        .bind(&id.table_name)
        .bind(id.event_code)
        .bind(content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
