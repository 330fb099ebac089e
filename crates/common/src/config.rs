//! Configuration management for Scriptsync
//!
//! All configuration lives in a single JSON document at the root of the
//! open workspace, mirroring how the host editor scopes settings to a
//! folder. The store password may be overridden through the environment so
//! credentials can stay out of the checked-in document.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the configuration document under the workspace root
pub const CONFIG_FILE: &str = "scriptsync.json";

/// Environment variable overriding `server.password`
pub const PASSWORD_ENV: &str = "SCRIPTSYNC_DB_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store server connection parameters
    pub server: ServerConfig,

    /// Application-store scope (macros, search scripts)
    pub app: AppScope,

    /// Security-store scope (table event scripts, library units)
    pub sec: SecScope,

    /// Path of the event map document, absolute or workspace-relative
    pub events_file: String,

    /// Output folder names per artifact type plus the report folder
    pub folders: Folders,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppScope {
    pub database: String,
    /// Acting user name owning pulled/pushed macros
    pub user: String,
    /// Application names bounding scoped pulls
    #[serde(default)]
    pub app_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecScope {
    pub database: String,
    pub company_no: i32,
    /// Acting user name owning pulled/pushed event scripts
    pub user: String,
    #[serde(default)]
    pub app_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folders {
    pub macros: String,
    pub event_scripts: String,
    pub library: String,
    pub search_scripts: String,
    pub output: String,
}

fn default_port() -> u16 {
    5432
}

impl Config {
    /// Load the configuration document from the workspace root.
    ///
    /// A missing document is a workspace error (nothing to sync against); a
    /// malformed one surfaces the underlying parse failure.
    pub fn load(workspace_root: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = workspace_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Err(Error::Workspace(format!(
                "{} not found in the workspace",
                CONFIG_FILE
            )));
        }

        let raw = std::fs::read_to_string(&path)?;
        let mut config: Self = serde_json::from_str(&raw)?;

        if let Ok(password) = env::var(PASSWORD_ENV) {
            config.server.password = password;
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the event map document path against the workspace root
    pub fn events_path(&self, workspace_root: &Path) -> PathBuf {
        let path = Path::new(&self.events_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace_root.join(path)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        if self.events_file.is_empty() {
            return Err(Error::Config("events_file must not be empty".to_string()));
        }
        for (name, value) in [
            ("folders.macros", &self.folders.macros),
            ("folders.event_scripts", &self.folders.event_scripts),
            ("folders.library", &self.folders.library),
            ("folders.search_scripts", &self.folders.search_scripts),
            ("folders.output", &self.folders.output),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// The directory the command was invoked from, standing in for the host
/// editor's open workspace folder
pub fn workspace_root() -> Result<PathBuf> {
    env::current_dir().map_err(|e| Error::Workspace(format!("no workspace is open: {}", e)))
}
