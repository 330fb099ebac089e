//! Artifacts domain: the script/macro synchronization engine
//!
//! One mapping, two directions: pull materializes store rows as workspace
//! files, push upserts a saved file back into its row. The rules live on
//! [`ArtifactKind`]; the event map translates between event codes and the
//! names table event scripts are filed under.

pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    macro_button_defaults, Artifact, ArtifactIdentity, ArtifactKind, EventScriptIdentity,
    EventScriptRow, LibraryUnitIdentity, LibraryUnitRow, MacroIdentity, MacroRow,
    SearchScriptIdentity, SearchScriptRow, BUTTON_PREFIX, GLOBAL_LABEL, SCRIPT_EXT,
};
pub use domain::events::EventMap;
pub use domain::paths::{classify, identity_from_path, relative_path, PathContext};

// Re-export repository types
pub use repository::{
    EventScriptRepository, LibraryUnitRepository, MacroRepository, SearchScriptRepository,
};

// Re-export service types
pub use service::pull::{
    pull_all_event_scripts, pull_all_macros, pull_event_scripts, pull_event_scripts_for_app,
    pull_library_units, pull_macros, pull_macros_for_app, pull_search_scripts, GroupOutcome,
    GroupStatus, PullReport,
};
pub use service::push::{
    execute_push, plan_push, push_saved_file, PushOutcome, PushRequest,
};
