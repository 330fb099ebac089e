//! Push engine: saved file → store upsert
//!
//! Planning is pure: classify the saved path, reconstruct the row identity,
//! and fail before any store work when the event map cannot resolve the
//! file name. Execution runs exactly one existence check and then exactly
//! one insert or update, decided solely by the check's result.

use std::path::Path;

use sqlx::PgPool;
use tracing::info;

use scriptsync_common::{Config, Error, Result};

use crate::domain::entities::{Artifact, ArtifactIdentity, GLOBAL_LABEL};
use crate::domain::events::EventMap;
use crate::domain::paths::{classify, identity_from_path, PathContext};
use crate::repository::{
    EventScriptRepository, LibraryUnitRepository, MacroRepository, SearchScriptRepository,
};

/// Result of pushing one saved file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new row was inserted for the identity
    Inserted,
    /// The existing row's content column was replaced
    Updated,
    /// The save was outside the recognized folders and touched nothing
    Ignored,
}

/// A planned upsert: the artifact reconstructed from a saved file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub artifact: Artifact,
}

/// Reconstruct the artifact a saved file represents.
///
/// Returns `Ok(None)` when the save is none of this system's business: the
/// file lies outside the workspace, under an unrecognized root, or at a
/// depth no kind claims. Event-name resolution failures are real errors —
/// the save was meant for us but cannot be addressed.
pub fn plan_push(
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
    saved_path: &Path,
    content: String,
) -> Result<Option<PushRequest>> {
    let rel_path = match saved_path.strip_prefix(workspace_root) {
        Ok(rel) => rel,
        Err(_) => return Ok(None),
    };

    let Some(kind) = classify(rel_path, &config.folders) else {
        return Ok(None);
    };

    let ctx = PathContext::new(config, events);
    let identity = identity_from_path(kind, rel_path, &ctx)?;
    Ok(Some(PushRequest {
        artifact: Artifact { identity, content },
    }))
}

/// Run the planned upsert against the store the artifact's kind lives in.
/// The pool must belong to that store.
pub async fn execute_push(pool: &PgPool, request: &PushRequest) -> Result<PushOutcome> {
    let content = &request.artifact.content;
    match &request.artifact.identity {
        ArtifactIdentity::Macro(id) => {
            let repo = MacroRepository::new(pool.clone());
            let scope = if id.app_name.is_empty() {
                GLOBAL_LABEL
            } else {
                id.app_name.as_str()
            };
            if repo.exists(id).await? {
                repo.update_content(id, content).await?;
                info!("Macro {} for {} has been updated.", id.macro_name, scope);
                Ok(PushOutcome::Updated)
            } else {
                repo.insert(id, content).await?;
                info!("Macro {} for {} has been inserted.", id.macro_name, scope);
                Ok(PushOutcome::Inserted)
            }
        }
        ArtifactIdentity::LibraryUnit(id) => {
            let repo = LibraryUnitRepository::new(pool.clone());
            if repo.exists(id).await? {
                repo.update_content(id, content).await?;
                info!(
                    "Library unit {} for {} has been updated.",
                    id.unit_name, id.user_name
                );
                Ok(PushOutcome::Updated)
            } else {
                repo.insert(id, content).await?;
                info!(
                    "Library unit {} for {} has been inserted.",
                    id.unit_name, id.user_name
                );
                Ok(PushOutcome::Inserted)
            }
        }
        ArtifactIdentity::TableEventScript(id) => {
            let repo = EventScriptRepository::new(pool.clone());
            if repo.exists(id).await? {
                repo.update_content(id, content).await?;
                info!(
                    "Script {}/{} for {} has been updated.",
                    id.table_name, id.event_code, id.app_name
                );
                Ok(PushOutcome::Updated)
            } else {
                repo.insert(id, content).await?;
                info!(
                    "Script {}/{} for {} has been inserted.",
                    id.table_name, id.event_code, id.app_name
                );
                Ok(PushOutcome::Inserted)
            }
        }
        ArtifactIdentity::SearchScript(id) => {
            let repo = SearchScriptRepository::new(pool.clone());
            if repo.exists(id).await? {
                repo.update_content(id, content).await?;
                info!(
                    "Search Script {} for {} has been updated.",
                    id.field_name, id.table_name
                );
                Ok(PushOutcome::Updated)
            } else {
                // The field catalog is not ours to extend; a save against a
                // missing field definition aborts this push only.
                Err(Error::NotFound(format!(
                    "no field definition for {}.{}",
                    id.table_name, id.field_name
                )))
            }
        }
    }
}

/// Plan and run the push for one saved document, opening the store
/// connection scoped to this operation
pub async fn push_saved_file(
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
    saved_path: &Path,
    content: String,
) -> Result<PushOutcome> {
    let Some(request) = plan_push(workspace_root, config, events, saved_path, content)? else {
        return Ok(PushOutcome::Ignored);
    };

    let store = request.artifact.identity.kind().store();
    let pool = scriptsync_common::connect(config, store).await?;
    execute_push(&pool, &request).await
}
