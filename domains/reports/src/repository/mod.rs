//! Repository implementations for the Reports domain

pub mod lookups;

pub use lookups::{CompanyRepository, ReferenceCodeRepository};
