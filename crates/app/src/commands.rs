//! Command implementations: configuration loading, store wiring, service
//! dispatch
//!
//! Each command is its own operation: it loads the configuration fresh,
//! opens its own store connection, runs one service call, and lets the pool
//! drop on the way out.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use scriptsync_artifacts::{
    classify, pull_all_event_scripts, pull_all_macros, pull_event_scripts,
    pull_event_scripts_for_app, pull_library_units, pull_macros, pull_macros_for_app,
    pull_search_scripts, push_saved_file, ArtifactKind, EventMap, PullReport, PushOutcome,
};
use scriptsync_common::{connect, workspace_root, Config, Result, Store};
use scriptsync_reports::{
    company_table, reference_code_table, write_report, CompanyRepository, LookupFilter,
    ReferenceCodeRepository,
};

use crate::cli::{Command, PullTarget, ReportTarget};
use crate::watch;

/// File names the report targets write under the output folder
const DOC_TYPES_REPORT: &str = "doc-types.md";
const COMPANIES_REPORT: &str = "companies.md";

pub async fn run(command: Command) -> Result<()> {
    let root = workspace_root()?;
    let config = Config::load(&root)?;

    match command {
        Command::Pull { target } => pull(&root, &config, target).await,
        Command::Push { file } => push(&root, &config, &file).await,
        Command::Watch => watch::run(root, config).await,
        Command::Report { target } => report(&root, &config, target).await,
    }
}

async fn pull(root: &Path, config: &Config, target: PullTarget) -> Result<()> {
    let report = match target {
        PullTarget::Macros { all, app } => {
            let pool = connect(config, Store::App).await?;
            match (all, app) {
                (true, _) => pull_all_macros(&pool, root, config).await?,
                (false, Some(app)) => pull_macros_for_app(&pool, root, config, &app).await?,
                (false, None) => pull_macros(&pool, root, config).await?,
            }
        }
        PullTarget::Events { all, app } => {
            let events = EventMap::load(&config.events_path(root))?;
            let pool = connect(config, Store::Sec).await?;
            match (all, app) {
                (true, _) => pull_all_event_scripts(&pool, root, config, &events).await?,
                (false, Some(app)) => {
                    pull_event_scripts_for_app(&pool, root, config, &events, &app).await?
                }
                (false, None) => pull_event_scripts(&pool, root, config, &events).await?,
            }
        }
        PullTarget::Library => {
            let pool = connect(config, Store::Sec).await?;
            pull_library_units(&pool, root, config).await?
        }
        PullTarget::Search { table } => {
            let table = match table {
                Some(table) => table,
                None => prompt("Table name: ")?,
            };
            let pool = connect(config, Store::App).await?;
            pull_search_scripts(&pool, root, config, &table).await?
        }
    };

    summarize(&report);
    Ok(())
}

fn summarize(report: &PullReport) {
    info!(
        "Pulled {}s: {} files across {} scopes, {} scopes without rows.",
        report.kind,
        report.written_files(),
        report.groups.len(),
        report.missing_groups()
    );
}

async fn push(root: &Path, config: &Config, file: &Path) -> Result<()> {
    let outcome = push_file(root, config, &absolute(root, file)).await?;
    if outcome == PushOutcome::Ignored {
        info!(
            "{} is outside the recognized folders; nothing to push.",
            file.display()
        );
    }
    Ok(())
}

/// Push one saved file: read its text, load the event map when the save
/// needs one, and run the upsert. Shared with watch mode.
pub(crate) async fn push_file(
    root: &Path,
    config: &Config,
    saved_path: &Path,
) -> Result<PushOutcome> {
    let content = tokio::fs::read_to_string(saved_path).await?;
    let events = events_for_push(root, config, saved_path)?;
    push_saved_file(root, config, &events, saved_path, content).await
}

/// Only table event scripts reference the event map; other saves must not
/// fail on a missing or malformed events document.
fn events_for_push(root: &Path, config: &Config, saved_path: &Path) -> Result<EventMap> {
    let needs_events = saved_path
        .strip_prefix(root)
        .ok()
        .and_then(|rel| classify(rel, &config.folders))
        == Some(ArtifactKind::TableEventScript);
    if needs_events {
        EventMap::load(&config.events_path(root))
    } else {
        Ok(EventMap::default())
    }
}

async fn report(root: &Path, config: &Config, target: ReportTarget) -> Result<()> {
    match target {
        ReportTarget::DocTypes { filter } => {
            let filter = LookupFilter::parse(&filter)?;
            let pool = connect(config, Store::App).await?;
            let rows = ReferenceCodeRepository::new(pool.clone())
                .find_doc_types(&filter)
                .await?;
            write_report(
                root,
                &config.folders.output,
                DOC_TYPES_REPORT,
                &reference_code_table(&rows),
            )
            .await?;
        }
        ReportTarget::Companies => {
            let pool = connect(config, Store::Sec).await?;
            let rows = CompanyRepository::new(pool.clone()).list_all().await?;
            write_report(
                root,
                &config.folders.output,
                COMPANIES_REPORT,
                &company_table(&rows),
            )
            .await?;
        }
    }
    Ok(())
}

fn absolute(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
