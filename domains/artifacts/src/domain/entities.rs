//! Domain entities for the Artifacts domain
//!
//! An artifact is one persisted script/macro unit, represented as a file in
//! the workspace and a row in one of the two stores. The `ArtifactKind`
//! variants carry the full rule set for their kind — backing store, root
//! folder, path shape — so callers select rules once by classification
//! instead of comparing folder names.

use serde::{Deserialize, Serialize};

use scriptsync_common::{Folders, Store};

/// File extension shared by every materialized artifact
pub const SCRIPT_EXT: &str = "js";

/// Macro name prefix implying a toolbar button on insert
pub const BUTTON_PREFIX: &str = "btn";

/// Root label standing in for the empty application name on disk
pub const GLOBAL_LABEL: &str = "Global";

/// The four synchronized artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Macro,
    LibraryUnit,
    TableEventScript,
    SearchScript,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Macro,
        ArtifactKind::LibraryUnit,
        ArtifactKind::TableEventScript,
        ArtifactKind::SearchScript,
    ];

    /// The store this kind's rows live in
    pub fn store(&self) -> Store {
        match self {
            ArtifactKind::Macro | ArtifactKind::SearchScript => Store::App,
            ArtifactKind::LibraryUnit | ArtifactKind::TableEventScript => Store::Sec,
        }
    }

    /// Root folder name for this kind from the configuration
    pub fn folder<'c>(&self, folders: &'c Folders) -> &'c str {
        match self {
            ArtifactKind::Macro => &folders.macros,
            ArtifactKind::LibraryUnit => &folders.library,
            ArtifactKind::TableEventScript => &folders.event_scripts,
            ArtifactKind::SearchScript => &folders.search_scripts,
        }
    }

    /// Number of path segments below the workspace root, filename included.
    ///
    /// Table event scripts nest table name under application name and carry
    /// one segment more than the other kinds.
    pub fn path_segments(&self) -> usize {
        match self {
            ArtifactKind::TableEventScript => 4,
            _ => 3,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Macro => write!(f, "macro"),
            ArtifactKind::LibraryUnit => write!(f, "library unit"),
            ArtifactKind::TableEventScript => write!(f, "table event script"),
            ArtifactKind::SearchScript => write!(f, "search script"),
        }
    }
}

/// Identity of one macro row: (app, user, name). The empty application name
/// is the global scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroIdentity {
    pub app_name: String,
    pub user_name: String,
    pub macro_name: String,
}

/// Identity of one library unit row: (user, unit)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryUnitIdentity {
    pub user_name: String,
    pub unit_name: String,
}

/// Identity of one table event script row: (company, user, app, table, event)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventScriptIdentity {
    pub company_no: i32,
    pub user_name: String,
    pub app_name: String,
    pub table_name: String,
    pub event_code: i32,
}

/// Identity of one search script row: (table, field)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchScriptIdentity {
    pub table_name: String,
    pub field_name: String,
}

/// Composite key selecting exactly one row of exactly one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactIdentity {
    Macro(MacroIdentity),
    LibraryUnit(LibraryUnitIdentity),
    TableEventScript(EventScriptIdentity),
    SearchScript(SearchScriptIdentity),
}

impl ArtifactIdentity {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactIdentity::Macro(_) => ArtifactKind::Macro,
            ArtifactIdentity::LibraryUnit(_) => ArtifactKind::LibraryUnit,
            ArtifactIdentity::TableEventScript(_) => ArtifactKind::TableEventScript,
            ArtifactIdentity::SearchScript(_) => ArtifactKind::SearchScript,
        }
    }
}

/// One artifact as handled by the push engine: the row's identity plus its
/// full text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub identity: ArtifactIdentity,
    pub content: String,
}

/// Insert-time defaults a macro derives from its name.
///
/// A name carrying the button prefix creates a toolbar button whose caption
/// is the macro name; every other name gets no button and an empty caption.
/// Used only on insert, never on update.
pub fn macro_button_defaults(macro_name: &str) -> (i32, String) {
    if macro_name.starts_with(BUTTON_PREFIX) {
        (1, macro_name.to_string())
    } else {
        (0, String::new())
    }
}

/// One macro row as returned by pull queries
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MacroRow {
    pub app_name: String,
    pub macro_name: String,
    pub content: String,
}

/// One table event script row as returned by pull queries
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventScriptRow {
    pub app_name: String,
    pub table_name: String,
    pub event_code: i32,
    pub content: String,
}

/// One library unit row as returned by pull queries
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LibraryUnitRow {
    pub user_name: String,
    pub unit_name: String,
    pub content: String,
}

/// One search script row as returned by pull queries
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SearchScriptRow {
    pub field_name: String,
    pub content: String,
}
