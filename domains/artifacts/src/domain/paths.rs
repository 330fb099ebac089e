//! Path mapping for the Artifacts domain
//!
//! One rule table maps identities to workspace-relative paths and back. The
//! two directions are strict inverses: for every identity,
//! `identity_from_path(relative_path(id)) == id`. Scope values a path does
//! not encode (acting user, company number) come from the configuration
//! through [`PathContext`]; the event map translates between the event code
//! a row carries and the event name a file is called.

use std::path::{Component, Path, PathBuf};

use scriptsync_common::{Config, Error, Folders, Result};

use super::entities::{
    ArtifactIdentity, ArtifactKind, EventScriptIdentity, LibraryUnitIdentity, MacroIdentity,
    SearchScriptIdentity, GLOBAL_LABEL, SCRIPT_EXT,
};
use super::events::EventMap;

/// Configuration scope and event map needed to derive identities from paths
#[derive(Debug, Clone, Copy)]
pub struct PathContext<'a> {
    pub folders: &'a Folders,
    pub app_user: &'a str,
    pub sec_user: &'a str,
    pub company_no: i32,
    pub events: &'a EventMap,
}

impl<'a> PathContext<'a> {
    pub fn new(config: &'a Config, events: &'a EventMap) -> Self {
        Self {
            folders: &config.folders,
            app_user: &config.app.user,
            sec_user: &config.sec.user,
            company_no: config.sec.company_no,
            events,
        }
    }
}

/// Plain UTF-8 segments of a workspace-relative path. Paths escaping the
/// root or carrying non-UTF-8 names never take part in the mapping.
fn segments(rel_path: &Path) -> Option<Vec<&str>> {
    let mut out = Vec::new();
    for component in rel_path.components() {
        match component {
            Component::Normal(segment) => out.push(segment.to_str()?),
            _ => return None,
        }
    }
    Some(out)
}

/// Classify a saved file by its root folder and path shape.
///
/// Returns `None` — the save is ignored, not an error — for non-script
/// extensions, unknown root folders, and paths whose segment count does not
/// match the kind rooted there.
pub fn classify(rel_path: &Path, folders: &Folders) -> Option<ArtifactKind> {
    if rel_path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXT) {
        return None;
    }
    let segments = segments(rel_path)?;
    let root = *segments.first()?;
    ArtifactKind::ALL
        .into_iter()
        .find(|kind| kind.folder(folders) == root && kind.path_segments() == segments.len())
}

/// Reconstruct the row identity encoded by a workspace-relative path.
///
/// The kind must come from [`classify`] on the same path; a mismatched
/// shape is a validation error. Event names that the map cannot resolve
/// fail with a not-found error before any store work happens.
pub fn identity_from_path(
    kind: ArtifactKind,
    rel_path: &Path,
    ctx: &PathContext<'_>,
) -> Result<ArtifactIdentity> {
    let segments = segments(rel_path).ok_or_else(|| {
        Error::Validation(format!("path {} is not workspace-relative", rel_path.display()))
    })?;
    if segments.len() != kind.path_segments() {
        return Err(Error::Validation(format!(
            "path {} does not match the {} layout",
            rel_path.display(),
            kind
        )));
    }

    let name = rel_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            Error::Validation(format!("path {} has no file name", rel_path.display()))
        })?;

    let identity = match kind {
        ArtifactKind::Macro => {
            let app_name = if segments[1] == GLOBAL_LABEL {
                String::new()
            } else {
                segments[1].to_string()
            };
            ArtifactIdentity::Macro(MacroIdentity {
                app_name,
                user_name: ctx.app_user.to_string(),
                macro_name: name.to_string(),
            })
        }
        ArtifactKind::LibraryUnit => ArtifactIdentity::LibraryUnit(LibraryUnitIdentity {
            user_name: segments[1].to_string(),
            unit_name: name.to_string(),
        }),
        ArtifactKind::TableEventScript => {
            let event_code = ctx.events.code_for(name).ok_or_else(|| {
                Error::NotFound(format!("event '{}' not found in the event map", name))
            })?;
            ArtifactIdentity::TableEventScript(EventScriptIdentity {
                company_no: ctx.company_no,
                user_name: ctx.sec_user.to_string(),
                app_name: segments[1].to_string(),
                table_name: segments[2].to_string(),
                event_code,
            })
        }
        ArtifactKind::SearchScript => ArtifactIdentity::SearchScript(SearchScriptIdentity {
            table_name: segments[1].to_string(),
            field_name: name.to_string(),
        }),
    };
    Ok(identity)
}

/// Workspace-relative path an identity materializes at — the inverse of
/// [`identity_from_path`]
pub fn relative_path(
    identity: &ArtifactIdentity,
    folders: &Folders,
    events: &EventMap,
) -> Result<PathBuf> {
    let root = identity.kind().folder(folders);
    let path = match identity {
        ArtifactIdentity::Macro(id) => {
            let scope = if id.app_name.is_empty() {
                GLOBAL_LABEL
            } else {
                id.app_name.as_str()
            };
            Path::new(root).join(scope).join(file_name(&id.macro_name))
        }
        ArtifactIdentity::LibraryUnit(id) => Path::new(root)
            .join(&id.user_name)
            .join(file_name(&id.unit_name)),
        ArtifactIdentity::TableEventScript(id) => {
            let event_name = events.name_for(id.event_code).ok_or_else(|| {
                Error::NotFound(format!(
                    "event code {} not found in the event map",
                    id.event_code
                ))
            })?;
            Path::new(root)
                .join(&id.app_name)
                .join(&id.table_name)
                .join(file_name(event_name))
        }
        ArtifactIdentity::SearchScript(id) => Path::new(root)
            .join(&id.table_name)
            .join(file_name(&id.field_name)),
    };
    Ok(path)
}

/// File name an artifact materializes under
pub fn file_name(artifact_name: &str) -> String {
    format!("{}.{}", artifact_name, SCRIPT_EXT)
}
