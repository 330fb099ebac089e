//! Watch mode: the implicit push trigger
//!
//! Stands in for the host editor's save notification: a modify event on a
//! script file under a recognized root folder is treated as a save and
//! pushed. Saves outside those folders are ignored without comment. One
//! failing push never stops the loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info, warn};

use scriptsync_artifacts::classify;
use scriptsync_common::{Config, Error, Result};

use crate::commands;

/// Editors fire several modify events per save; pushes for the same file
/// inside this window are collapsed into one.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

pub async fn run(workspace_root: PathBuf, config: Config) -> Result<()> {
    info!(
        "Watching {} for saved scripts. Press Ctrl+C to stop.",
        workspace_root.display()
    );

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher = Watcher::new(
        tx,
        notify::Config::default().with_poll_interval(Duration::from_millis(500)),
    )
    .map_err(|e| Error::Unexpected(anyhow::anyhow!("failed to create watcher: {}", e)))?;

    watcher
        .watch(&workspace_root, RecursiveMode::Recursive)
        .map_err(|e| Error::Unexpected(anyhow::anyhow!("failed to watch workspace: {}", e)))?;

    let mut last_pushed: HashMap<PathBuf, Instant> = HashMap::new();

    for event in rx {
        match event {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }
                for path in event.paths {
                    handle_saved_path(&workspace_root, &config, &mut last_pushed, &path).await;
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

async fn handle_saved_path(
    root: &Path,
    config: &Config,
    last_pushed: &mut HashMap<PathBuf, Instant>,
    path: &Path,
) {
    // Saves outside the recognized folders are none of our business
    let Ok(rel_path) = path.strip_prefix(root) else {
        return;
    };
    if classify(rel_path, &config.folders).is_none() {
        debug!("Ignored save: {}", rel_path.display());
        return;
    }
    if !path.is_file() {
        return;
    }

    if let Some(pushed_at) = last_pushed.get(path) {
        if pushed_at.elapsed() < DEBOUNCE_WINDOW {
            debug!("Debounced save: {}", rel_path.display());
            return;
        }
    }

    match commands::push_file(root, config, path).await {
        Ok(_) => {
            last_pushed.insert(path.to_path_buf(), Instant::now());
        }
        Err(e) if e.is_recoverable() => {
            warn!("Push skipped for {}: {}", rel_path.display(), e);
        }
        Err(e) => {
            error!("Error pushing {}: {}", rel_path.display(), e);
        }
    }
}
