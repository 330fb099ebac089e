//! Reports domain: ad hoc lookups rendered as fixed-width text tables

pub mod domain;
pub mod render;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{CompanyRecord, LookupFilter, ReferenceCode};

// Re-export rendering
pub use render::{company_table, reference_code_table, write_report, TextTable};

// Re-export repository types
pub use repository::{CompanyRepository, ReferenceCodeRepository};
