//! Repository implementations for the Artifacts domain
//!
//! One repository per artifact kind, each holding the operation-scoped pool
//! for the store its rows live in. The kinds span two stores, so there is
//! deliberately no combined aggregate over a single pool.

pub mod event_scripts;
pub mod library_units;
pub mod macros;
pub mod search_scripts;

pub use event_scripts::EventScriptRepository;
pub use library_units::LibraryUnitRepository;
pub use macros::MacroRepository;
pub use search_scripts::SearchScriptRepository;
