//! Lookup repositories for the Reports domain

use sqlx::PgPool;

use scriptsync_common::Result;

use crate::domain::entities::{CompanyRecord, LookupFilter, ReferenceCode};

#[derive(Clone)]
pub struct ReferenceCodeRepository {
    pool: PgPool,
}

impl ReferenceCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Document-type codes of the voucher header table matching the filter
    pub async fn find_doc_types(&self, filter: &LookupFilter) -> Result<Vec<ReferenceCode>> {
        let rows = match filter {
            LookupFilter::Code(code) => {
                sqlx::query_as::<_, ReferenceCode>(
                    r#"
                    SELECT kod AS code, aciklama AS description
                    FROM refkrt
                    WHERE tabload = 'EVRBAS' AND alanad = 'EVRAKTIP' AND kod = $1
                    "#,
                )
                .bind(code)
                .fetch_all(&self.pool)
                .await?
            }
            LookupFilter::Description(text) => {
                sqlx::query_as::<_, ReferenceCode>(
                    r#"
                    SELECT kod AS code, aciklama AS description
                    FROM refkrt
                    WHERE tabload = 'EVRBAS' AND alanad = 'EVRAKTIP' AND aciklama LIKE $1
                    "#,
                )
                .bind(format!("%{}%", text))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }
}

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every known company record, ordered for stable report output
    pub async fn list_all(&self) -> Result<Vec<CompanyRecord>> {
        let rows = sqlx::query_as::<_, CompanyRecord>(
            r#"
            SELECT companyno AS company_no, companyname AS company_name,
                   servername AS server_name, databasename AS database_name
            FROM seccmp
            ORDER BY companyno
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
