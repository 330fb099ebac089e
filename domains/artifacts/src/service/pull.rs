//! Pull engine: store → workspace materialization
//!
//! A pull walks its scope elements strictly in order. Each element queries
//! the store once, then writes that group's files before the next element
//! is touched, so a partial failure leaves a deterministic prefix of files
//! behind. A scope element with no rows is recorded and skipped, never
//! fatal.

use std::path::{Path, PathBuf};

use sqlx::PgPool;
use tracing::{info, warn};

use scriptsync_common::{Config, Error, Result};

use crate::domain::entities::{
    ArtifactKind, EventScriptRow, LibraryUnitRow, MacroRow, SearchScriptRow, GLOBAL_LABEL,
};
use crate::domain::events::EventMap;
use crate::domain::paths::file_name;
use crate::repository::{
    EventScriptRepository, LibraryUnitRepository, MacroRepository, SearchScriptRepository,
};

/// What happened to one scope element of a pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    /// The group's rows were materialized as this many files
    Written(usize),
    /// The store had no rows for this scope element
    NotFound,
}

/// Outcome of one scope element, labeled for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub scope: String,
    pub status: GroupStatus,
}

/// Per-group outcome report of one pull operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReport {
    pub kind: ArtifactKind,
    pub groups: Vec<GroupOutcome>,
}

impl PullReport {
    pub fn new(kind: ArtifactKind) -> Self {
        Self {
            kind,
            groups: Vec::new(),
        }
    }

    /// Total files written across all groups
    pub fn written_files(&self) -> usize {
        self.groups
            .iter()
            .map(|group| match group.status {
                GroupStatus::Written(count) => count,
                GroupStatus::NotFound => 0,
            })
            .sum()
    }

    /// Number of scope elements the store had no rows for
    pub fn missing_groups(&self) -> usize {
        self.groups
            .iter()
            .filter(|group| group.status == GroupStatus::NotFound)
            .count()
    }
}

/// Write one group's files under `base_dir`, creating directories
/// recursively. Existing files are overwritten — last pull wins. Each write
/// completes before the next is attempted.
pub async fn write_group(base_dir: &Path, files: &[(PathBuf, String)]) -> Result<usize> {
    tokio::fs::create_dir_all(base_dir).await?;
    let mut written = 0;
    for (rel_path, content) in files {
        let target = base_dir.join(rel_path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, content).await?;
        written += 1;
    }
    Ok(written)
}

/// Files of one macro group. Rows with an empty macro name carry nothing
/// addressable and are skipped.
pub fn macro_files(rows: Vec<MacroRow>) -> Vec<(PathBuf, String)> {
    rows.into_iter()
        .filter(|row| !row.macro_name.is_empty())
        .map(|row| (PathBuf::from(file_name(&row.macro_name)), row.content))
        .collect()
}

/// Files of one event script group, nested per table. A row whose event
/// code is missing from the map has no file name to materialize under; it
/// is reported and skipped.
pub fn event_files(rows: Vec<EventScriptRow>, events: &EventMap) -> Vec<(PathBuf, String)> {
    rows.into_iter()
        .filter_map(|row| match events.name_for(row.event_code) {
            Some(event_name) => Some((
                Path::new(&row.table_name).join(file_name(event_name)),
                row.content,
            )),
            None => {
                warn!(
                    "No event name for code {} ({}/{}); row skipped.",
                    row.event_code, row.app_name, row.table_name
                );
                None
            }
        })
        .collect()
}

/// Files of one library group. Rows with an empty unit name are skipped.
pub fn library_files(rows: Vec<LibraryUnitRow>) -> Vec<(PathBuf, String)> {
    rows.into_iter()
        .filter(|row| !row.unit_name.is_empty())
        .map(|row| (PathBuf::from(file_name(&row.unit_name)), row.content))
        .collect()
}

/// Files of one search script group
pub fn search_files(rows: Vec<SearchScriptRow>) -> Vec<(PathBuf, String)> {
    rows.into_iter()
        .map(|row| (PathBuf::from(file_name(&row.field_name)), row.content))
        .collect()
}

fn macro_scope_label(app_name: &str) -> &str {
    if app_name.is_empty() {
        GLOBAL_LABEL
    } else {
        app_name
    }
}

/// Pull macros for the application names configured in the workspace
pub async fn pull_macros(pool: &PgPool, workspace_root: &Path, config: &Config) -> Result<PullReport> {
    if config.app.app_names.is_empty() {
        return Err(Error::Config(
            "no application names configured for macros".to_string(),
        ));
    }
    pull_macro_groups(pool, workspace_root, config, config.app.app_names.clone()).await
}

/// Pull macros for every application name present in the store
pub async fn pull_all_macros(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
) -> Result<PullReport> {
    let repo = MacroRepository::new(pool.clone());
    let app_names = repo.distinct_app_names().await?;
    pull_macro_groups(pool, workspace_root, config, app_names).await
}

/// Pull macros for a single application name. The group directory uses the
/// name casing stored in the rows, not the requested casing.
pub async fn pull_macros_for_app(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    app_name: &str,
) -> Result<PullReport> {
    let repo = MacroRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::Macro);

    let rows = repo.list_for_app(app_name, &config.app.user).await?;
    if rows.is_empty() {
        warn!("No macros found for APPNAME: {}", macro_scope_label(app_name));
        report.groups.push(GroupOutcome {
            scope: macro_scope_label(app_name).to_string(),
            status: GroupStatus::NotFound,
        });
        return Ok(report);
    }

    let stored_name = if app_name.is_empty() {
        String::new()
    } else {
        rows[0].app_name.clone()
    };
    let scope = macro_scope_label(&stored_name).to_string();
    let dir = workspace_root.join(&config.folders.macros).join(&scope);
    let written = write_group(&dir, &macro_files(rows)).await?;
    info!("Macros for {} have been saved.", scope);
    report.groups.push(GroupOutcome {
        scope,
        status: GroupStatus::Written(written),
    });
    Ok(report)
}

async fn pull_macro_groups(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    app_names: Vec<String>,
) -> Result<PullReport> {
    let repo = MacroRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::Macro);

    for app_name in app_names {
        let scope = macro_scope_label(&app_name).to_string();
        let rows = repo.list_for_app(&app_name, &config.app.user).await?;
        if rows.is_empty() {
            warn!("No macros found for APPNAME: {}", scope);
            report.groups.push(GroupOutcome {
                scope,
                status: GroupStatus::NotFound,
            });
            continue;
        }

        let dir = workspace_root.join(&config.folders.macros).join(&scope);
        let written = write_group(&dir, &macro_files(rows)).await?;
        info!("Macros for {} have been saved.", scope);
        report.groups.push(GroupOutcome {
            scope,
            status: GroupStatus::Written(written),
        });
    }
    Ok(report)
}

/// Pull event scripts for the application names configured in the workspace
pub async fn pull_event_scripts(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
) -> Result<PullReport> {
    if config.sec.app_names.is_empty() {
        return Err(Error::Config(
            "no application names configured for event scripts".to_string(),
        ));
    }
    pull_event_script_groups(
        pool,
        workspace_root,
        config,
        events,
        config.sec.app_names.clone(),
    )
    .await
}

/// Pull event scripts for every application name present in the store
pub async fn pull_all_event_scripts(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
) -> Result<PullReport> {
    let repo = EventScriptRepository::new(pool.clone());
    let app_names = repo
        .distinct_app_names(config.sec.company_no, &config.sec.user)
        .await?;
    pull_event_script_groups(pool, workspace_root, config, events, app_names).await
}

/// Pull event scripts for a single application name, normalized to the
/// stored casing
pub async fn pull_event_scripts_for_app(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
    app_name: &str,
) -> Result<PullReport> {
    let repo = EventScriptRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::TableEventScript);

    let rows = repo
        .list_for_app(config.sec.company_no, &config.sec.user, app_name)
        .await?;
    if rows.is_empty() {
        warn!("No script found for APPNAME: {}", app_name);
        report.groups.push(GroupOutcome {
            scope: app_name.to_string(),
            status: GroupStatus::NotFound,
        });
        return Ok(report);
    }

    let scope = rows[0].app_name.clone();
    let dir = workspace_root.join(&config.folders.event_scripts).join(&scope);
    let written = write_group(&dir, &event_files(rows, events)).await?;
    info!("Script for {} have been saved.", scope);
    report.groups.push(GroupOutcome {
        scope,
        status: GroupStatus::Written(written),
    });
    Ok(report)
}

async fn pull_event_script_groups(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    events: &EventMap,
    app_names: Vec<String>,
) -> Result<PullReport> {
    let repo = EventScriptRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::TableEventScript);

    for app_name in app_names {
        let rows = repo
            .list_for_app(config.sec.company_no, &config.sec.user, &app_name)
            .await?;
        if rows.is_empty() {
            warn!("No script found for APPNAME: {}", app_name);
            report.groups.push(GroupOutcome {
                scope: app_name,
                status: GroupStatus::NotFound,
            });
            continue;
        }

        let dir = workspace_root
            .join(&config.folders.event_scripts)
            .join(&app_name);
        let written = write_group(&dir, &event_files(rows, events)).await?;
        info!("Script for {} have been saved.", app_name);
        report.groups.push(GroupOutcome {
            scope: app_name,
            status: GroupStatus::Written(written),
        });
    }
    Ok(report)
}

/// Pull every user's library units; the scope set is discovered from the
/// store
pub async fn pull_library_units(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
) -> Result<PullReport> {
    let repo = LibraryUnitRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::LibraryUnit);

    let user_names = repo.distinct_user_names().await?;
    if user_names.is_empty() {
        warn!("No users own library units.");
        return Ok(report);
    }

    for user_name in user_names {
        let rows = repo.list_for_user(&user_name).await?;
        if rows.is_empty() {
            warn!("No library found for USERNAME: {}", user_name);
            report.groups.push(GroupOutcome {
                scope: user_name,
                status: GroupStatus::NotFound,
            });
            continue;
        }

        let dir = workspace_root.join(&config.folders.library).join(&user_name);
        let written = write_group(&dir, &library_files(rows)).await?;
        info!("Library for {} have been saved.", user_name);
        report.groups.push(GroupOutcome {
            scope: user_name,
            status: GroupStatus::Written(written),
        });
    }
    Ok(report)
}

/// Pull the search scripts of one table. The table name is normalized to
/// upper case the way the store keys its catalog.
pub async fn pull_search_scripts(
    pool: &PgPool,
    workspace_root: &Path,
    config: &Config,
    table_name: &str,
) -> Result<PullReport> {
    let table_name = table_name.trim().to_uppercase();
    if table_name.is_empty() {
        return Err(Error::Validation("table name must not be empty".to_string()));
    }

    let repo = SearchScriptRepository::new(pool.clone());
    let mut report = PullReport::new(ArtifactKind::SearchScript);

    let rows = repo.list_for_table(&table_name).await?;
    if rows.is_empty() {
        warn!("No search script found for TABLENAME: {}", table_name);
        report.groups.push(GroupOutcome {
            scope: table_name,
            status: GroupStatus::NotFound,
        });
        return Ok(report);
    }

    let dir = workspace_root
        .join(&config.folders.search_scripts)
        .join(&table_name);
    let written = write_group(&dir, &search_files(rows)).await?;
    info!("Search Script for {} have been saved.", table_name);
    report.groups.push(GroupOutcome {
        scope: table_name,
        status: GroupStatus::Written(written),
    });
    Ok(report)
}
