//! Domain entities for the Reports domain

use scriptsync_common::{Error, Result};

/// One reference code row: a numeric code with its display description
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReferenceCode {
    pub code: i32,
    pub description: String,
}

/// One company record from the security store
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CompanyRecord {
    pub company_no: i32,
    pub company_name: String,
    pub server_name: String,
    pub database_name: String,
}

/// How a free-text lookup input bounds the reference query.
///
/// Input that parses as an integer matches the code column exactly; any
/// other text is a case-sensitive substring match against the description
/// column. Both forms dispatch as bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFilter {
    Code(i32),
    Description(String),
}

impl LookupFilter {
    /// Validate and parse the user-supplied filter input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::Validation(
                "lookup filter must not be empty".to_string(),
            ));
        }
        match input.parse::<i32>() {
            Ok(code) => Ok(LookupFilter::Code(code)),
            Err(_) => Ok(LookupFilter::Description(input.to_string())),
        }
    }
}
